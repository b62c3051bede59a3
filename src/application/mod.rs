//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::PortfolioContent;
pub use services::{
    AssetManager, ImageOptimizer, ImagePreloader, PageAssets, ResolvedImage, ToastQueue,
};
pub use use_cases::{LoadContentUseCase, SendContactUseCase};
