//! Domain error types.

mod asset_error;
mod contact_error;
mod content_error;

pub use asset_error::{AssetError, AssetResult};
pub use contact_error::{ContactError, FieldError};
pub use content_error::ContentError;
