use std::collections::{BTreeMap, HashMap};

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::TryStreamExt;

use crate::domain::{AttachmentKind, ContactSubmission, FilePart, MAX_FILE_SIZE};

/// Ceiling for a single text field.
pub const MAX_TEXT_FIELD_SIZE: usize = 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("{field} exceeds the limit of {limit} bytes")]
    PayloadTooLarge { field: String, limit: usize },
    #[error("{0}")]
    Malformed(String),
}

impl From<MultipartError> for DecodeError {
    fn from(e: MultipartError) -> Self {
        DecodeError::Malformed(e.to_string())
    }
}

/// A decoded `multipart/form-data` body before validation.
#[derive(Debug, Default)]
pub struct ContactForm {
    pub fields: HashMap<String, String>,
    pub attachments: BTreeMap<AttachmentKind, FilePart>,
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = String;

    fn try_from(mut form: ContactForm) -> Result<Self, Self::Error> {
        ContactSubmission::parse(
            form.fields.remove("name"),
            form.fields.remove("email"),
            form.fields.remove("message"),
            form.attachments,
        )
    }
}

#[tracing::instrument(name = "Decoding the contact form body", skip(payload))]
pub async fn decode_contact_form(mut payload: Multipart) -> Result<ContactForm, DecodeError> {
    let mut form = ContactForm::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_owned();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let outcome = match filename {
            // An empty file input is sent with `filename=""` and no content.
            Some(filename) if filename.is_empty() => discard(&mut field).await,
            Some(filename) => match AttachmentKind::from_field_name(&name) {
                Some(kind) if form.attachments.contains_key(&kind) => discard(&mut field)
                    .await
                    .and(Err(DecodeError::Malformed(format!("Unexpected field: {name}")))),
                Some(kind) => read_limited(&mut field, &name, MAX_FILE_SIZE)
                    .await
                    .map(|content| {
                        form.attachments.insert(kind, FilePart::new(filename, content));
                    }),
                None => {
                    tracing::debug!(field = %name, "Ignoring unknown file part");
                    discard(&mut field).await
                }
            },
            None => read_text(&mut field, &name).await.map(|value| {
                form.fields.insert(name, value);
            }),
        };

        if let Err(e) = outcome {
            // Consume the rest of the body so the client gets to read the response.
            let _ = discard(&mut field).await;
            drain(payload).await;
            return Err(e);
        }
    }

    Ok(form)
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, DecodeError> {
    let bytes = read_limited(field, name, MAX_TEXT_FIELD_SIZE).await?;
    String::from_utf8(bytes)
        .map_err(|_| DecodeError::Malformed(format!("Field {name} is not valid UTF-8")))
}

/// Stops buffering at the first chunk that crosses `limit`.
async fn read_limited(
    field: &mut Field,
    name: &str,
    limit: usize,
) -> Result<Vec<u8>, DecodeError> {
    let mut buffer = Vec::new();

    while let Some(chunk) = field.try_next().await? {
        if buffer.len() + chunk.len() > limit {
            return Err(DecodeError::PayloadTooLarge {
                field: name.to_owned(),
                limit,
            });
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer)
}

async fn discard(field: &mut Field) -> Result<(), DecodeError> {
    while field.try_next().await?.is_some() {}
    Ok(())
}

async fn drain(mut payload: Multipart) {
    while let Ok(Some(mut field)) = payload.try_next().await {
        if discard(&mut field).await.is_err() {
            break;
        }
    }
}
