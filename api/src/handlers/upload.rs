//! Multipart form reading shared by the upload endpoints

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::domain::ports::ImageUpload;
use crate::error::AppError;

/// Largest accepted image
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Text fields plus the optional `image` file part
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

            if bytes.len() > MAX_IMAGE_BYTES {
                return Err(AppError::BadRequest(format!(
                    "Image exceeds {} bytes",
                    MAX_IMAGE_BYTES
                )));
            }
            if bytes.is_empty() {
                continue;
            }

            form.image = Some(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
