mod lazy_image;
mod optimized_image;
mod toast_stack;

pub use lazy_image::{DEFAULT_FALLBACK_SRC, LazyImage, LazyImageProps, LazyImageState, LoadPhase};
pub use optimized_image::{ImageSource, OptimizedImage};
pub use toast_stack::{ToastStack, ToastStyle, render_toasts};
