//! Sensitive content detection
//!
//! Posts whose text mentions any of the keywords are blurred until the viewer
//! reveals them. Matching is a plain substring test over the lower-cased
//! `"{title} {description}"`, so a longer word that contains a keyword also
//! matches. Whole-word matching has not been decided upstream.

/// Terms that mark a post as sensitive
pub const SENSITIVE_KEYWORDS: [&str; 4] = ["offensive", "inappropriate", "explicit", "nsfw"];

/// Whether a post with this title and description should start blurred
pub fn is_sensitive(title: &str, description: &str) -> bool {
    let content = format!("{} {}", title, description).to_lowercase();
    SENSITIVE_KEYWORDS
        .iter()
        .any(|keyword| content.contains(keyword))
}
