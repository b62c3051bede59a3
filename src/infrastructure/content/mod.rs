//! Content API adapter.

mod client;
mod dto;

pub use client::ContentApiClient;
