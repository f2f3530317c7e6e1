use std::collections::HashMap;

use serde::Serialize;

use super::{ContactSubmission, EmailAddress};

pub const NOTIFICATION_SUBJECT: &str = "New Contact Form Submission";

const ATTACHMENT_DISCLAIMER: &str =
    "Note: File attachments were received but not included in this email.";

const HTML_TEMPLATE_NAME: &str = "contact_notification.html";
const TEXT_TEMPLATE_NAME: &str = "contact_notification.txt";
const HTML_TEMPLATE: &str = include_str!("../../views/contact_notification.html");
const TEXT_TEMPLATE: &str = include_str!("../../views/contact_notification.txt");

/// The email sent to the operator for one contact form submission.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    from: EmailAddress,
    to: EmailAddress,
    subject: String,
    html_body: String,
    text_body: String,
}

#[derive(Serialize)]
struct AttachmentSummary<'a> {
    label: &'static str,
    filename: &'a str,
    size: String,
}

impl NotificationMessage {
    pub fn for_submission(
        submission: &ContactSubmission,
        from: EmailAddress,
        to: EmailAddress,
    ) -> Result<Self, tera::Error> {
        let attachments: Vec<AttachmentSummary> = submission
            .attachments
            .iter()
            .map(|(kind, part)| AttachmentSummary {
                label: kind.label(),
                filename: &part.original_filename,
                size: format_size(part.size_bytes),
            })
            .collect();

        let templates = templates()?;
        let mut ctx = tera::Context::new();
        ctx.insert("name", &submission.name);
        ctx.insert("email", &submission.email);
        ctx.insert("message", &submission.message);
        ctx.insert("attachments", &attachments);
        ctx.insert("disclaimer", ATTACHMENT_DISCLAIMER);

        Ok(Self {
            from,
            to,
            subject: NOTIFICATION_SUBJECT.into(),
            html_body: templates.render(HTML_TEMPLATE_NAME, &ctx)?,
            text_body: templates.render(TEXT_TEMPLATE_NAME, &ctx)?,
        })
    }

    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    pub fn to(&self) -> &EmailAddress {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn html_body(&self) -> &str {
        &self.html_body
    }

    pub fn text_body(&self) -> &str {
        &self.text_body
    }
}

/// Only the `.html` template is autoescaped, and only with [`escape_html_text`].
fn templates() -> Result<tera::Tera, tera::Error> {
    let mut tera = tera::Tera::default();
    tera.set_escape_fn(escape_html_text);
    tera.register_filter("escape_text", escape_text_filter);
    tera.add_raw_templates(vec![
        (HTML_TEMPLATE_NAME, HTML_TEMPLATE),
        (TEXT_TEMPLATE_NAME, TEXT_TEMPLATE),
    ])?;
    Ok(tera)
}

/// Encodes `& < > "`. Apostrophes and slashes are left alone so names and
/// links read the same in the email as they were typed.
fn escape_html_text(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
    output
}

fn escape_text_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let text = tera::try_get_value!("escape_text", "value", String, value);
    Ok(tera::Value::String(escape_html_text(&text)))
}

/// Sizes are always reported in KB with two decimals.
pub fn format_size(size_bytes: usize) -> String {
    format!("{:.2} KB", size_bytes as f64 / 1024.0)
}
