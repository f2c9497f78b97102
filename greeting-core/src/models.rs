use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};

/// A created birthday greeting. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Greeting {
    pub id: String,
    pub recipient_name: String,
    pub recipient_age: u8,
    /// Public photo references in carousel order
    pub photos: Vec<String>,
}

/// Insert shape of a greeting (the store assigns the id)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewGreeting {
    pub recipient_name: String,
    pub recipient_age: u8,
    pub photos: Vec<String>,
}

impl NewGreeting {
    pub fn new(recipient_name: impl Into<String>, recipient_age: u8, photos: Vec<String>) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            recipient_age,
            photos,
        }
    }

    /// Validates all fields of the greeting
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_name(&self.recipient_name)?;
        validation::validate_age(i64::from(self.recipient_age))?;
        validation::validate_photo_count(self.photos.len())?;
        Ok(())
    }
}

/// One failing form field in an error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(e: &ValidationError) -> Self {
        Self {
            field: e.field().to_string(),
            message: e.to_string(),
        }
    }
}

/// Body of every non-2xx API response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ApiErrorBody {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

impl From<&ValidationError> for ApiErrorBody {
    fn from(e: &ValidationError) -> Self {
        Self {
            error: e.to_string(),
            fields: vec![FieldError::from(e)],
        }
    }
}
