use crate::config::{server_url, API_ORIGIN};
use crate::error::AppError;
use greeting_core::validation::{FIELD_AGE, FIELD_NAME, FIELD_PHOTOS};
use greeting_core::{ApiErrorBody, Greeting, Submission};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};

/// HTTP client for the greeting server
#[derive(Clone)]
pub struct GreetingApi {
    client: reqwest::Client,
    origin: String,
}

impl Default for GreetingApi {
    fn default() -> Self {
        Self::new(API_ORIGIN)
    }
}

impl GreetingApi {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute URL for a stored photo reference
    pub fn photo_url(&self, reference: &str) -> String {
        server_url(&self.origin, reference)
    }

    /// Uploads the submission as one multipart request, photos in order
    pub async fn create(&self, submission: &Submission) -> Result<Greeting, AppError> {
        let mut form = Form::new()
            .text(FIELD_NAME, submission.recipient_name.clone())
            .text(FIELD_AGE, submission.recipient_age.to_string());

        for photo in &submission.photos {
            let part = Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.content_type)?;
            form = form.part(FIELD_PHOTOS, part);
        }

        log::info!(
            "Creating greeting for {} with {} photos",
            submission.recipient_name,
            submission.photos.len()
        );

        let response = self
            .client
            .post(server_url(&self.origin, "/api/greetings"))
            .multipart(form)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn fetch(&self, id: &str) -> Result<Greeting, AppError> {
        let response = self
            .client
            .get(server_url(&self.origin, &format!("/api/greetings/{}", id)))
            .send()
            .await?;

        decode(response).await
    }
}

async fn decode(response: Response) -> Result<Greeting, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound);
    }

    let body = response
        .json::<ApiErrorBody>()
        .await
        .unwrap_or_else(|_| ApiErrorBody::message(status.to_string()));
    log::warn!("Greeting request failed with {}: {}", status, body.error);

    if status.is_client_error() {
        Err(AppError::Rejected(body))
    } else {
        Err(AppError::Server(body.error))
    }
}
