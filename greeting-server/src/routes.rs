use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use greeting_core::{Greeting, NewGreeting};
use log::{info, warn};

use crate::{error::AppError, state::AppState, upload::read_create_request};

const CREATE_FAILED: &str = "Failed to create greeting";
const FETCH_FAILED: &str = "Failed to fetch greeting";

/// `POST /api/greetings`. Nothing is written unless the whole request is
/// valid, and stored photos are removed again if the insert fails.
pub async fn create_greeting_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Greeting>, AppError> {
    let request = read_create_request(multipart).await.map_err(|e| {
        warn!("Rejected greeting upload: {e}");
        e.during(CREATE_FAILED)
    })?;

    let (recipient_name, recipient_age) = request.validate().map_err(|e| {
        warn!("Rejected greeting: {e}");
        AppError::from(e)
    })?;

    let references = state
        .photos
        .store_all(&request.photos)
        .await
        .map_err(|e| e.during(CREATE_FAILED))?;

    let new = NewGreeting::new(recipient_name, recipient_age, references.clone());
    match state.greetings.create(new).await {
        Ok(greeting) => {
            info!(
                "Created greeting {} with {} photos",
                greeting.id,
                greeting.photos.len()
            );
            Ok(Json(greeting))
        }
        Err(e) => {
            warn!("Removing {} photos of a greeting that was not stored", references.len());
            state.photos.discard(&references).await;
            Err(e.during(CREATE_FAILED))
        }
    }
}

/// `GET /api/greetings/{id}`
pub async fn get_greeting_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Greeting>, AppError> {
    match state
        .greetings
        .get(&id)
        .await
        .map_err(|e| e.during(FETCH_FAILED))?
    {
        Some(greeting) => Ok(Json(greeting)),
        None => {
            info!("Greeting {id} not found");
            Err(AppError::NotFound)
        }
    }
}
