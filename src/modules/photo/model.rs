/// An image pulled out of a multipart upload, not yet validated.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PhotoConfig {
    pub max_photo_size: usize,
    pub allowed_mime_types: Vec<String>,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_photo_size: 5 * 1024 * 1024, // 5MB
            allowed_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
            ],
        }
    }
}
