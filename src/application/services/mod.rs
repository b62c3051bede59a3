pub mod asset_manager;
pub mod image_optimization;
pub mod image_preloader;
pub mod page_assets;
pub mod toast_queue;

pub use asset_manager::AssetManager;
pub use image_optimization::{ImageOptimizer, OPTIMIZED_QUALITY, ResolvedImage};
pub use image_preloader::ImagePreloader;
pub use page_assets::{PageAssets, default_routes};
pub use toast_queue::ToastQueue;
