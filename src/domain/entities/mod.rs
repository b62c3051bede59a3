//! Domain entities.

mod asset;
mod contact;
mod content;
mod toast;

pub use asset::{AssetCatalog, AssetStats, ImageFormat, OptimizeOptions, PageKey, PreloaderStats};
pub use contact::{ContactForm, MIN_MESSAGE_LEN, is_valid_email};
pub use content::{Achievement, Project, ResumeLink};
pub use toast::{DEFAULT_TOAST_DURATION, Toast, ToastId, ToastKind};
