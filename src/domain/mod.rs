//! Domain layer with core entities, pure services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Pure domain services.
pub mod services;

pub use entities::{ImageFormat, PageKey, Toast, ToastId, ToastKind};
pub use errors::{AssetError, AssetResult, ContactError, ContentError, FieldError};
pub use ports::{ContactPort, DocumentPort, FormatSupportPort, ImageFetchPort, VisibilityPort};
