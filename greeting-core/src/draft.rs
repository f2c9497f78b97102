//! Client-side model of the greeting creation form.
//!
//! Holds the selected photos in selection order and checks the same rules
//! the server enforces, so most mistakes are reported before uploading.

use crate::validation::{self, ValidationError, MAX_PHOTOS};

/// A photo picked in the form, not yet uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Data URL shown as thumbnail in the form
    pub preview_url: String,
}

/// Validated form content ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub recipient_name: String,
    pub recipient_age: u8,
    pub photos: Vec<DraftPhoto>,
}

/// All rule violations found on submit
#[derive(Debug, Clone, PartialEq)]
pub struct DraftError {
    pub errors: Vec<ValidationError>,
}

impl DraftError {
    /// First violation for the given form field
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for DraftError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GreetingDraft {
    pub recipient_name: String,
    /// Raw text of the age input
    pub recipient_age: String,
    photos: Vec<DraftPhoto>,
}

impl GreetingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photos(&self) -> &[DraftPhoto] {
        &self.photos
    }

    /// Adds a batch of picked files.
    ///
    /// The whole batch is refused if it would push the selection past the
    /// photo limit or if any file is not an acceptable image.
    pub fn add_photos(&mut self, batch: Vec<DraftPhoto>) -> Result<(), ValidationError> {
        let total = self.photos.len() + batch.len();
        if total > MAX_PHOTOS {
            return Err(ValidationError::TooManyPhotos(total));
        }
        for photo in &batch {
            validation::check_image_file(&photo.file_name, &photo.content_type, photo.bytes.len())?;
        }
        self.photos.extend(batch);
        Ok(())
    }

    /// Removes the photo at `index`; out-of-range indices are ignored
    pub fn remove_photo(&mut self, index: usize) {
        if index < self.photos.len() {
            self.photos.remove(index);
        }
    }

    /// Checks every field and returns the data to upload
    pub fn submission(&self) -> Result<Submission, DraftError> {
        let mut errors = Vec::new();

        let name = match validation::validate_name(&self.recipient_name) {
            Ok(name) => Some(name.to_string()),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let age = match validation::parse_age(&self.recipient_age) {
            Ok(age) => Some(age),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if let Err(e) = validation::validate_photo_count(self.photos.len()) {
            errors.push(e);
        }

        match (name, age) {
            (Some(recipient_name), Some(recipient_age)) if errors.is_empty() => Ok(Submission {
                recipient_name,
                recipient_age,
                photos: self.photos.clone(),
            }),
            _ => Err(DraftError { errors }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FIELD_AGE, FIELD_NAME, FIELD_PHOTOS, MAX_PHOTO_BYTES};

    fn photo(name: &str) -> DraftPhoto {
        DraftPhoto {
            file_name: name.to_string(),
            content_type: validation::guess_content_type(name).to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
            preview_url: String::new(),
        }
    }

    fn batch(n: usize) -> Vec<DraftPhoto> {
        (0..n).map(|i| photo(&format!("p{i}.jpg"))).collect()
    }

    #[test]
    fn test_add_and_remove_keeps_order() {
        let mut draft = GreetingDraft::new();
        draft
            .add_photos(vec![photo("a.jpg"), photo("b.png"), photo("c.gif")])
            .unwrap();
        draft.remove_photo(1);
        draft.remove_photo(10);

        let names: Vec<&str> = draft.photos().iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "c.gif"]);
    }

    #[test]
    fn test_batch_over_limit_is_refused_whole() {
        let mut draft = GreetingDraft::new();
        draft.add_photos(batch(10)).unwrap();

        let err = draft.add_photos(batch(3)).unwrap_err();
        assert_eq!(err, ValidationError::TooManyPhotos(13));
        assert_eq!(draft.photos().len(), 10);

        draft.add_photos(batch(2)).unwrap();
        assert_eq!(draft.photos().len(), 12);
    }

    #[test]
    fn test_batch_with_non_image_is_refused() {
        let mut draft = GreetingDraft::new();
        let mut notes = photo("notes.txt");
        notes.content_type = "text/plain".to_string();

        assert!(draft.add_photos(vec![photo("a.jpg"), notes]).is_err());
        assert!(draft.photos().is_empty());
    }

    #[test]
    fn test_oversized_photo_is_refused() {
        let mut draft = GreetingDraft::new();
        let mut big = photo("big.jpg");
        big.bytes = vec![0; MAX_PHOTO_BYTES + 1];
        assert!(matches!(
            draft.add_photos(vec![big]),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_submission_needs_two_photos() {
        let mut draft = GreetingDraft::new();
        draft.recipient_name = "Sam".to_string();
        draft.recipient_age = "30".to_string();
        draft.add_photos(batch(1)).unwrap();

        let err = draft.submission().unwrap_err();
        assert_eq!(err.errors, vec![ValidationError::TooFewPhotos(1)]);

        draft.add_photos(batch(1)).unwrap();
        let submission = draft.submission().unwrap();
        assert_eq!(submission.recipient_name, "Sam");
        assert_eq!(submission.recipient_age, 30);
        assert_eq!(submission.photos.len(), 2);
    }

    #[test]
    fn test_submission_reports_every_field() {
        let mut draft = GreetingDraft::new();
        draft.recipient_age = "200".to_string();

        let err = draft.submission().unwrap_err();
        assert!(err.for_field(FIELD_NAME).is_some());
        assert_eq!(err.for_field(FIELD_AGE), Some(&ValidationError::AgeOutOfRange(200)));
        assert!(err.for_field(FIELD_PHOTOS).is_some());
    }
}
