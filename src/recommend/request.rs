//! Typed recommendation requests for callers that build them locally (CLI).
//!
//! The HTTP routes forward whatever body the browser sent; these types only
//! describe the fields the ML service reads.

use serde::{Deserialize, Serialize};

/// Number of recommendations per page. "Load more" asks for the current
/// count plus one more page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// `POST /recommend-song`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRequest {
    pub song_name: String,
    pub artist_name: String,
    pub num_recommendations: u32,
}

impl SongRequest {
    pub fn new(song_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            song_name: song_name.into(),
            artist_name: artist_name.into(),
            num_recommendations: DEFAULT_PAGE_SIZE,
        }
    }

    /// The request for the next page of results
    pub fn load_more(&self) -> Self {
        Self {
            num_recommendations: self.num_recommendations.saturating_add(DEFAULT_PAGE_SIZE),
            ..self.clone()
        }
    }
}

/// Moods the ML service knows feature ranges for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Chill,
    Energetic,
    Live,
    Romantic,
}

/// `POST /recommend-mood`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRequest {
    pub mood: Mood,
    /// Genre tags; a row matches if any tag is a substring of its tags
    #[serde(default)]
    pub tags: Vec<String>,
    pub num_recommendations: u32,
}

impl MoodRequest {
    pub fn new(mood: Mood, tags: Vec<String>) -> Self {
        Self {
            mood,
            tags,
            num_recommendations: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_request_body() {
        let request = SongRequest::new("Smells Like Teen Spirit", "Nirvana");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "song_name": "Smells Like Teen Spirit",
                "artist_name": "Nirvana",
                "num_recommendations": 12
            })
        );
    }

    #[test]
    fn test_load_more_adds_a_page() {
        let request = SongRequest::new("a", "b").load_more().load_more();
        assert_eq!(request.num_recommendations, 36);
        assert_eq!(request.song_name, "a");
    }

    #[test]
    fn test_mood_request_body() {
        let request = MoodRequest::new(Mood::Chill, vec!["jazz".to_string()]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "mood": "chill",
                "tags": ["jazz"],
                "num_recommendations": 12
            })
        );
    }
}
