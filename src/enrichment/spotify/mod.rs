//! Spotify integration
//!
//! Track metadata and audio features from the Spotify Web API, authorized with
//! an app-only token from the client-credentials grant.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

mod adapter;
mod client;
pub mod dto;
pub mod token;

pub use client::SpotifyClient;
pub use token::{ClientCredentials, Credential, IssuedToken, TokenCache, TokenSource};
