//! Endpoint functions, one module per API area.

pub mod playlists;
pub mod search;
