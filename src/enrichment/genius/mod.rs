//! Genius integration
//!
//! Lyrics page URL and song description for a song/artist pair.
//! API docs: https://docs.genius.com

mod adapter;
mod client;
pub mod dto;

pub use client::GeniusClient;
