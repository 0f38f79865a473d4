use crate::api::error;
use crate::modules::photo::model::{PhotoConfig, PhotoUpload};

/// Turns an uploaded image into the byte sequence stored on a post.
#[derive(Clone)]
pub struct PhotoService {
    config: PhotoConfig,
}

impl PhotoService {
    pub fn new(config: PhotoConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PhotoConfig::default())
    }

    pub fn photo_as_bytes(&self, upload: PhotoUpload) -> Result<Vec<u8>, error::SystemError> {
        if upload.bytes.is_empty() {
            return Err(error::SystemError::bad_request("Uploaded photo is empty"));
        }

        if upload.bytes.len() > self.config.max_photo_size {
            return Err(error::SystemError::bad_request(format!(
                "Photo exceeds maximum allowed size of {} bytes",
                self.config.max_photo_size
            )));
        }

        let mime_type = match upload.content_type {
            Some(ct) => ct,
            None => mime_guess::from_path(&upload.filename)
                .first()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        };

        if !self.config.allowed_mime_types.contains(&mime_type) {
            return Err(error::SystemError::bad_request(format!(
                "File type '{}' is not allowed",
                mime_type
            )));
        }

        Ok(upload.bytes)
    }
}
