//! Thin client for the parts of the Spotify Web API that spotty uses:
//! track search, the current user's profile, and playlist mutation.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod models;

pub use client::{ApiError, SpotifyClient};
pub use config::ApiConfig;
