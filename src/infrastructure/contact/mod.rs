//! Contact form delivery adapter.

mod client;
mod dto;

pub use client::EmailClient;
