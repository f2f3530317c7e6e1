use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use anyhow::Context;

use super::{errors::ContactError, multipart::decode_contact_form};
use crate::{
    domain::{ContactSubmission, NotificationMessage},
    email_client::EmailClient,
    startup::ContactMailbox,
};

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(payload, email_client, mailbox),
    fields(submitter_name = tracing::field::Empty, submitter_email = tracing::field::Empty)
)]
pub async fn submit_contact_form(
    payload: Multipart,
    email_client: web::Data<EmailClient>,
    mailbox: web::Data<ContactMailbox>,
) -> Result<HttpResponse, ContactError> {
    let form = decode_contact_form(payload).await?;

    let submission: ContactSubmission =
        form.try_into().map_err(ContactError::ValidationError)?;
    tracing::Span::current().record("submitter_name", tracing::field::display(&submission.name));
    tracing::Span::current().record("submitter_email", tracing::field::display(&submission.email));

    if !email_client.is_configured() {
        return Err(ContactError::ServiceUnavailable);
    }

    let message = NotificationMessage::for_submission(
        &submission,
        mailbox.sender.clone(),
        mailbox.recipient.clone(),
    )
    .context("Failed to render the notification email.")?;

    email_client
        .send_email(&message)
        .await
        .map_err(ContactError::DispatchFailure)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Email sent successfully",
    })))
}
