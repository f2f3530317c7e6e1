mod contact_handler;
mod errors;
mod multipart;

pub use contact_handler::submit_contact_form;
