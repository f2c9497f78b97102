//! Field and upload rules shared by the greeting form and the API.

use thiserror::Error;

pub const MIN_PHOTOS: usize = 2;
pub const MAX_PHOTOS: usize = 12;
pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 150;
/// Per-file upload ceiling (10 MB)
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Image kinds accepted for upload, matched against extension and content type
pub const IMAGE_KINDS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

pub const FIELD_NAME: &str = "recipientName";
pub const FIELD_AGE: &str = "recipientAge";
pub const FIELD_PHOTOS: &str = "photos";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter the recipient's name")]
    NameRequired,

    #[error("Please enter a valid age")]
    AgeNotANumber(String),

    #[error("Please enter a valid age (between 1 and 150)")]
    AgeOutOfRange(i64),

    #[error("Please upload at least 2 photos")]
    TooFewPhotos(usize),

    #[error("You can upload a maximum of 12 photos")]
    TooManyPhotos(usize),

    #[error("Only image files are allowed ({0})")]
    NotAnImage(String),

    #[error("{name} is larger than 10 MB")]
    FileTooLarge { name: String, size: usize },
}

impl ValidationError {
    /// Form field the rule belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => FIELD_NAME,
            ValidationError::AgeNotANumber(_) | ValidationError::AgeOutOfRange(_) => FIELD_AGE,
            ValidationError::TooFewPhotos(_)
            | ValidationError::TooManyPhotos(_)
            | ValidationError::NotAnImage(_)
            | ValidationError::FileTooLarge { .. } => FIELD_PHOTOS,
        }
    }
}

/// Returns the trimmed name, rejecting blank input
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(trimmed)
}

pub fn validate_age(age: i64) -> Result<u8, ValidationError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    Ok(age as u8)
}

/// Parses the age as sent by a form field (decimal text, surrounding blanks allowed)
pub fn parse_age(text: &str) -> Result<u8, ValidationError> {
    let age: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::AgeNotANumber(text.to_string()))?;
    validate_age(age)
}

pub fn validate_photo_count(count: usize) -> Result<(), ValidationError> {
    if count < MIN_PHOTOS {
        return Err(ValidationError::TooFewPhotos(count));
    }
    if count > MAX_PHOTOS {
        return Err(ValidationError::TooManyPhotos(count));
    }
    Ok(())
}

/// Lowercased extension of `file_name` including the dot, or empty
pub fn file_extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

fn names_image_kind(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    IMAGE_KINDS.iter().any(|kind| text.contains(kind))
}

/// Both the extension and the declared content type must name an image kind
pub fn is_allowed_image(file_name: &str, content_type: &str) -> bool {
    let ext = file_extension(file_name);
    let ext_ok = IMAGE_KINDS
        .iter()
        .any(|kind| ext.trim_start_matches('.') == *kind);
    ext_ok && content_type.starts_with("image/") && names_image_kind(content_type)
}

/// Guesses a content type from the file extension (for clients without one)
pub fn guess_content_type(file_name: &str) -> &'static str {
    match file_extension(file_name).as_str() {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Checks one uploaded file against the type and size rules
pub fn check_image_file(
    file_name: &str,
    content_type: &str,
    size: usize,
) -> Result<(), ValidationError> {
    if !is_allowed_image(file_name, content_type) {
        return Err(ValidationError::NotAnImage(file_name.to_string()));
    }
    if size > MAX_PHOTO_BYTES {
        return Err(ValidationError::FileTooLarge {
            name: file_name.to_string(),
            size,
        });
    }
    Ok(())
}
