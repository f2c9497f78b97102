//! Multipart parsing and photo persistence for new greetings.

use crate::error::AppError;
use axum::extract::Multipart;
use greeting_core::validation::{
    self, check_image_file, file_extension, ValidationError, FIELD_AGE, FIELD_NAME, FIELD_PHOTOS,
    MAX_PHOTOS, MAX_PHOTO_BYTES,
};
use log::{debug, warn};
use rand::{distr::Alphanumeric, Rng};
use std::path::{Path, PathBuf};

/// Public prefix under which stored photos are served
pub const UPLOADS_PREFIX: &str = "/uploads/";

const RANDOM_ID_LEN: usize = 21;

/// One image file received in the `photos` field
#[derive(Debug, Clone)]
pub struct IncomingPhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields of a create request as they arrived, before validation
#[derive(Debug, Default)]
pub struct CreateRequest {
    pub recipient_name: Option<String>,
    pub recipient_age: Option<String>,
    pub photos: Vec<IncomingPhoto>,
}

impl CreateRequest {
    /// Checks the photo count first, then the recipient fields.
    /// Returns the trimmed name and the parsed age.
    pub fn validate(&self) -> Result<(String, u8), ValidationError> {
        validation::validate_photo_count(self.photos.len())?;
        let name = validation::validate_name(self.recipient_name.as_deref().unwrap_or_default())?;
        let age = validation::parse_age(self.recipient_age.as_deref().unwrap_or_default())?;
        Ok((name.to_string(), age))
    }
}

/// Reads the whole multipart body. Type, size and count limits are enforced
/// while streaming so oversized requests fail before they are buffered.
pub async fn read_create_request(mut multipart: Multipart) -> Result<CreateRequest, AppError> {
    let mut request = CreateRequest::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            FIELD_NAME => request.recipient_name = Some(field.text().await?),
            FIELD_AGE => request.recipient_age = Some(field.text().await?),
            FIELD_PHOTOS => {
                if request.photos.len() == MAX_PHOTOS {
                    return Err(ValidationError::TooManyPhotos(MAX_PHOTOS + 1).into());
                }

                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                check_image_file(&file_name, &content_type, 0)?;

                let mut bytes = Vec::new();
                while let Some(chunk) = field.chunk().await? {
                    let size = bytes.len() + chunk.len();
                    if size > MAX_PHOTO_BYTES {
                        return Err(ValidationError::FileTooLarge {
                            name: file_name,
                            size,
                        }
                        .into());
                    }
                    bytes.extend_from_slice(&chunk);
                }

                request.photos.push(IncomingPhoto {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => debug!("Ignoring form field {other:?}"),
        }
    }

    Ok(request)
}

/// Stored photo files on disk
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// `<random-id>-<unix-millis><.ext>`, keeping the original extension
    pub fn unique_file_name(original: &str) -> String {
        let random_id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_ID_LEN)
            .map(char::from)
            .collect();

        format!(
            "{random_id}-{}{}",
            chrono::Utc::now().timestamp_millis(),
            file_extension(original)
        )
    }

    /// Writes every photo and returns their public references in input
    /// order. Nothing is left behind if a write fails.
    pub async fn store_all(&self, photos: &[IncomingPhoto]) -> Result<Vec<String>, AppError> {
        let mut references = Vec::with_capacity(photos.len());

        for photo in photos {
            let name = Self::unique_file_name(&photo.file_name);
            if let Err(e) = tokio::fs::write(self.dir.join(&name), &photo.bytes).await {
                self.discard(&references).await;
                return Err(e.into());
            }
            references.push(format!("{UPLOADS_PREFIX}{name}"));
        }

        Ok(references)
    }

    /// Removes previously stored photos by reference
    pub async fn discard(&self, references: &[String]) {
        for reference in references {
            let Some(name) = reference.strip_prefix(UPLOADS_PREFIX) else {
                continue;
            };
            if let Err(e) = tokio::fs::remove_file(self.dir.join(name)).await {
                warn!("Failed to remove orphaned upload {name}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn photo(name: &str, bytes: &[u8]) -> IncomingPhoto {
        IncomingPhoto {
            file_name: name.to_string(),
            content_type: validation::guess_content_type(name).to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_unique_file_name_shape() {
        let name = PhotoStore::unique_file_name("Party.JPG");
        let (random_id, rest) = name.split_once('-').unwrap();

        assert_eq!(random_id.len(), RANDOM_ID_LEN);
        assert!(random_id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(rest.ends_with(".jpg"));
        assert!(rest.trim_end_matches(".jpg").parse::<i64>().is_ok());
        assert_ne!(name, PhotoStore::unique_file_name("Party.JPG"));
    }

    #[test]
    fn test_validate_checks_photos_before_fields() {
        let request = CreateRequest {
            recipient_name: None,
            recipient_age: Some("abc".to_string()),
            photos: vec![photo("a.png", b"a")],
        };
        assert_eq!(request.validate(), Err(ValidationError::TooFewPhotos(1)));

        let request = CreateRequest {
            recipient_name: Some(" Sam ".to_string()),
            recipient_age: Some("30".to_string()),
            photos: vec![photo("a.png", b"a"), photo("b.gif", b"b")],
        };
        assert_eq!(request.validate(), Ok(("Sam".to_string(), 30)));
    }

    #[tokio::test]
    async fn test_store_all_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path());

        let references = store
            .store_all(&[photo("one.png", b"first"), photo("two.webp", b"second")])
            .await
            .unwrap();

        assert_eq!(references.len(), 2);
        assert!(references[0].ends_with(".png"));
        assert!(references[1].ends_with(".webp"));

        let first = references[0].strip_prefix(UPLOADS_PREFIX).unwrap();
        assert_eq!(std::fs::read(dir.path().join(first)).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_discard_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path());

        let references = store
            .store_all(&[photo("one.png", b"1"), photo("two.png", b"2")])
            .await
            .unwrap();
        store.discard(&references).await;

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
