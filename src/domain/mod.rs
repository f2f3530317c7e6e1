mod attachment;
mod contact_submission;
mod email_address;
mod notification;

pub use attachment::{AttachmentKind, FilePart, MAX_FILE_SIZE};
pub use contact_submission::ContactSubmission;
pub use email_address::EmailAddress;
pub use notification::{NOTIFICATION_SUBJECT, NotificationMessage, format_size};
