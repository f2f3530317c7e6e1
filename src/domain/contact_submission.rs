use std::collections::BTreeMap;

use super::{AttachmentKind, FilePart};

#[derive(Debug)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub attachments: BTreeMap<AttachmentKind, FilePart>,
}

impl ContactSubmission {
    /// Every text field must be present and non-empty.
    pub fn parse(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
        attachments: BTreeMap<AttachmentKind, FilePart>,
    ) -> Result<Self, String> {
        let missing: Vec<&str> = [("name", &name), ("email", &email), ("message", &message)]
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(field, _)| field)
            .collect();

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if missing.is_empty() => Ok(Self {
                name,
                email,
                message,
                attachments,
            }),
            _ => Err(format!("Missing required fields: {}", missing.join(", "))),
        }
    }
}
