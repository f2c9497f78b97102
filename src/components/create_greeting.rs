use crate::services::{preview, timer, GreetingApi};
use dioxus::prelude::*;
use dioxus_i18n::t;
use greeting_core::validation::{guess_content_type, FIELD_AGE, FIELD_NAME, FIELD_PHOTOS};
use greeting_core::{share_link, DraftError, DraftPhoto, GreetingDraft, ValidationError};
use std::time::Duration;

use super::photo_previews::PhotoPreviews;

const COPIED_FOR: Duration = Duration::from_secs(2);

/// Toast-style message above the form
#[derive(Clone, PartialEq, Debug)]
enum Notice {
    TooManyPhotos(String),
    MorePhotosNeeded(String),
    Failed(String),
}

impl Notice {
    fn from_photo_error(e: &ValidationError) -> Self {
        match e {
            ValidationError::TooManyPhotos(_) => Notice::TooManyPhotos(e.to_string()),
            ValidationError::TooFewPhotos(_) => Notice::MorePhotosNeeded(e.to_string()),
            _ => Notice::Failed(e.to_string()),
        }
    }

    fn title(&self) -> String {
        match self {
            Notice::TooManyPhotos(_) => t!("photos-too-many"),
            Notice::MorePhotosNeeded(_) => t!("photos-more-needed"),
            Notice::Failed(_) => t!("error-title"),
        }
    }

    fn description(&self) -> &str {
        match self {
            Notice::TooManyPhotos(d) | Notice::MorePhotosNeeded(d) | Notice::Failed(d) => d,
        }
    }
}

fn field_message(errors: &Option<DraftError>, field: &str) -> Option<String> {
    errors
        .as_ref()
        .and_then(|e| e.for_field(field))
        .map(|e| e.to_string())
}

#[component]
pub fn CreateGreetingScreen() -> Element {
    let mut draft = use_signal(GreetingDraft::new);
    let mut field_errors = use_signal(|| None::<DraftError>);
    let mut notice = use_signal(|| None::<Notice>);
    let mut submitting = use_signal(|| false);
    let mut link = use_signal(|| None::<String>);
    let mut copied = use_signal(|| false);
    let api = use_hook(GreetingApi::default);

    let pick_photos = move |evt: FormEvent| {
        let files = evt.files();
        spawn(async move {
            let mut batch = Vec::new();
            for file in files {
                let file_name = file.name();
                let content_type = file
                    .content_type()
                    .unwrap_or_else(|| guess_content_type(&file_name).to_string());
                match file.read_bytes().await {
                    Ok(bytes) => batch.push(DraftPhoto {
                        preview_url: preview::data_url(&content_type, &bytes),
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    }),
                    Err(e) => log::warn!("Failed to read {}: {:?}", file_name, e),
                }
            }

            let added = batch.len();
            match draft.write().add_photos(batch) {
                Ok(()) => {
                    log::debug!("Added {} photos", added);
                    notice.set(None);
                }
                Err(e) => notice.set(Some(Notice::from_photo_error(&e))),
            }
        });
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }

        let submission = match draft.read().submission() {
            Ok(submission) => submission,
            Err(e) => {
                if let Some(photo_error) = e.for_field(FIELD_PHOTOS) {
                    notice.set(Some(Notice::from_photo_error(photo_error)));
                }
                field_errors.set(Some(e));
                return;
            }
        };

        field_errors.set(None);
        notice.set(None);
        submitting.set(true);

        let api = api.clone();
        spawn(async move {
            match api.create(&submission).await {
                Ok(greeting) => {
                    log::info!("Greeting {} created", greeting.id);
                    link.set(Some(share_link(api.origin(), &greeting.id)));
                }
                Err(e) => {
                    log::error!("Failed to create greeting: {}", e);
                    notice.set(Some(Notice::Failed(e.user_message())));
                }
            }
            submitting.set(false);
        });
    };

    let copy_link = move |_| {
        let Some(url) = link() else {
            return;
        };
        spawn(async move {
            let quoted = serde_json::to_string(&url).unwrap_or_default();
            if let Err(e) = document::eval(&format!("navigator.clipboard.writeText({})", quoted)).await
            {
                log::warn!("Clipboard write failed: {:?}", e);
                return;
            }
            copied.set(true);
            timer::sleep(COPIED_FOR).await;
            copied.set(false);
        });
    };

    let previews: Vec<String> = draft
        .read()
        .photos()
        .iter()
        .map(|p| p.preview_url.clone())
        .collect();
    let name_error = field_message(&field_errors(), FIELD_NAME);
    let age_error = field_message(&field_errors(), FIELD_AGE);

    rsx! {
        div { class: "page page-light",
            div { style: "max-width: 640px; width: 100%; margin: 0 auto;",
                div { style: "text-align: center; margin-bottom: 32px;",
                    h1 { style: "font-size: 40px; margin: 0 0 8px 0;", "🎂 " {t!("app-title")} }
                    p { style: "color: #666; font-size: 18px;", {t!("app-tagline")} }
                }

                if let Some(n) = notice() {
                    div { class: "notice",
                        strong { "{n.title()}" }
                        p { style: "margin: 4px 0 0 0;", "{n.description()}" }
                    }
                }

                form { onsubmit: submit,
                    div { class: "card",
                        h2 { {t!("photos-heading")} }
                        label { class: "drop-zone",
                            p { style: "font-weight: 600; margin: 0;", "📷 " {t!("photos-pick")} }
                            p { style: "color: #888; margin: 4px 0 0 0;", {t!("photos-hint")} }
                            input {
                                r#type: "file",
                                accept: "image/*",
                                multiple: true,
                                style: "display: none;",
                                onchange: pick_photos,
                            }
                        }
                        PhotoPreviews {
                            previews,
                            on_remove: move |index| draft.write().remove_photo(index),
                        }
                    }

                    div { class: "card",
                        h2 { {t!("details-heading")} }
                        label { class: "field",
                            span { {t!("name-label")} }
                            input {
                                r#type: "text",
                                placeholder: t!("name-placeholder"),
                                value: "{draft.read().recipient_name}",
                                oninput: move |e| draft.write().recipient_name = e.value(),
                            }
                            if let Some(msg) = name_error {
                                span { class: "field-error", "{msg}" }
                            }
                        }
                        label { class: "field",
                            span { {t!("age-label")} }
                            input {
                                r#type: "number",
                                min: "1",
                                max: "150",
                                placeholder: t!("age-placeholder"),
                                value: "{draft.read().recipient_age}",
                                oninput: move |e| draft.write().recipient_age = e.value(),
                            }
                            if let Some(msg) = age_error {
                                span { class: "field-error", "{msg}" }
                            }
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "btn-primary btn-wide",
                        disabled: submitting(),
                        if submitting() {
                            {t!("submit-pending")}
                        } else {
                            "✨ " {t!("submit")}
                        }
                    }
                }

                if let Some(url) = link() {
                    div { class: "card card-success",
                        h3 { "🎉 " {t!("created-title")} }
                        p { {t!("created-share")} }
                        div { style: "display: flex; gap: 8px;",
                            input { r#type: "text", readonly: true, value: "{url}", style: "flex: 1;" }
                            button {
                                r#type: "button",
                                class: "btn-primary",
                                title: t!("copy-link"),
                                onclick: copy_link,
                                if copied() {
                                    "✓ " {t!("copied")}
                                } else {
                                    "📋"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
