mod contact_port;
mod content_port;
mod document_port;
mod format_support_port;
mod image_fetch_port;
mod visibility_port;

pub use contact_port::ContactPort;
pub use content_port::ContentPort;
pub use document_port::{DocumentPort, LinkHint, LinkRel};
pub use format_support_port::FormatSupportPort;
pub use image_fetch_port::ImageFetchPort;
pub use visibility_port::{
    DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD, Rect, VisibilityOptions, VisibilityPort,
    VisibilitySubscription, VisibilityTrigger,
};
