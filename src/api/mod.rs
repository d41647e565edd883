pub mod auth_api;
pub mod client;
pub mod connection_api;
pub mod match_api;
pub mod profile_api;

pub use client::ApiUpstreamError;
