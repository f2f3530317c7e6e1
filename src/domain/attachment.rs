/// Ceiling for a single uploaded file, 5 MiB.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// The file parts the contact form accepts. Declaration order is the order
/// attachments are listed in the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttachmentKind {
    LightBill,
    LocationPhoto,
}

impl AttachmentKind {
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "lightBill" => Some(Self::LightBill),
            "locationPhoto" => Some(Self::LocationPhoto),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LightBill => "Light Bill",
            Self::LocationPhoto => "Location Photo",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilePart {
    pub original_filename: String,
    pub size_bytes: usize,
    pub content: Vec<u8>,
}

impl FilePart {
    pub fn new(original_filename: String, content: Vec<u8>) -> Self {
        Self {
            original_filename,
            size_bytes: content.len(),
            content,
        }
    }
}
