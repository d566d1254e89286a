//! Adapter layer: Convert Genius DTOs to domain models

use super::dto;
use crate::enrichment::domain::LyricsInfo;

/// Pick the most relevant search hit, if any.
///
/// Genius ranks hits itself; we take the first one.
pub fn best_hit(search: dto::SearchResponse) -> Option<dto::SongSummary> {
    search.response.hits.into_iter().next().map(|hit| hit.result)
}

/// Convert a song detail response to lyrics info
pub fn to_lyrics_info(song: dto::SongResponse) -> LyricsInfo {
    let song = song.response.song;
    LyricsInfo {
        genius_url: song.url,
        description: song.description.and_then(|d| d.plain).and_then(clean_description),
    }
}

/// Genius uses "?" as the description of songs nobody has annotated yet
fn clean_description(plain: String) -> Option<String> {
    let trimmed = plain.trim();
    if trimmed.is_empty() || trimmed == "?" {
        None
    } else {
        Some(trimmed.to_string())
    }
}
