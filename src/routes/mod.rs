mod contact;
mod health_check;
mod helpers;
mod home;

pub use contact::submit_contact_form;
pub use health_check::health_check;
pub use helpers::{e500, error_chain_fmt, method_not_allowed, not_found};
pub use home::home;
