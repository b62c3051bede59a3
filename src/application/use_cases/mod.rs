//! Use case implementations.

mod load_content_use_case;
mod send_contact_use_case;

pub use load_content_use_case::LoadContentUseCase;
pub use send_contact_use_case::SendContactUseCase;
