//! Pinata API client implementation

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::ports::{FileStore, ImageUpload};
use crate::error::UploadError;

pub struct PinataClient {
    http: Client,
    base_url: String,
    jwt: String,
}

impl PinataClient {
    pub fn new(base_url: String, jwt: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            jwt,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash", default)]
    ipfs_hash: Option<String>,
}

fn hash_from(resp: PinResponse) -> Result<String, UploadError> {
    resp.ipfs_hash
        .filter(|h| !h.trim().is_empty())
        .ok_or(UploadError::MissingHash)
}

#[async_trait]
impl FileStore for PinataClient {
    async fn pin_file(&self, upload: &ImageUpload) -> Result<String, UploadError> {
        let content_type = if upload.content_type.is_empty() {
            "application/octet-stream"
        } else {
            upload.content_type.as_str()
        };
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let resp = self
            .http
            .post(self.api_url("/pinning/pinFileToIPFS"))
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(UploadError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: PinResponse = resp.json().await?;
        let hash = hash_from(body)?;
        tracing::debug!(file = %upload.file_name, bytes = upload.bytes.len(), hash = %hash, "File pinned");
        Ok(hash)
    }
}
