//! Recommendation proxy - forwards recommendation requests to the ML service.
//!
//! The ML service owns all ranking logic. This module only relays JSON
//! request bodies and relays the answer (or the upstream error) back.

mod client;
mod request;

pub use client::{DEFAULT_ML_SERVICE_URL, ProxyError, Recommender, RecommenderClient, Upstream};
pub use request::{DEFAULT_PAGE_SIZE, Mood, MoodRequest, SongRequest};
