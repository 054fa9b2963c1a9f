// src/podcast.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// === IDENTIFIERS ===
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PodcastId(String);

impl std::fmt::Display for PodcastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PodcastId {
    pub fn new(s: &str) -> Self {
        PodcastId(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PodcastId {
    // Useful for passing to functions expecting &str
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// === CATALOG STRUCTURES ===

/// One entry of the catalog listing. Immutable once received; the whole
/// vector is replaced on a fresh fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastSummary {
    id: PodcastId,
    title: String,
    image: Url,
    // The list endpoint reports seasons as a plain count.
    seasons: u32,
    // An absent genre array degrades to empty rather than failing the record.
    #[serde(default)]
    genres: Vec<u32>,
    updated: DateTime<Utc>,
}

/// Extended record for a single podcast, fetched on demand when the user
/// opens a catalog entry. Lives only while that selection is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastDetail {
    id: PodcastId,
    title: String,
    image: Url,
    #[serde(default)]
    description: String,
    // The detail endpoint expands seasons into a list.
    #[serde(default)]
    seasons: Vec<Season>,
    #[serde(default)]
    genres: Vec<u32>,
    updated: DateTime<Utc>,
}

/// A season as reported by the detail endpoint. No identity beyond list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    title: String,
    episodes: u32,
}

impl PodcastSummary {
    pub fn new(
        id: PodcastId,
        title: String,
        image: Url,
        seasons: u32,
        genres: Vec<u32>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self { id, title, image, seasons, genres, updated }
    }
    // Accessor methods

    pub fn id(&self) -> &PodcastId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &Url {
        &self.image
    }

    pub fn seasons(&self) -> u32 {
        self.seasons
    }

    pub fn genres(&self) -> &[u32] {
        &self.genres
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
}

impl PodcastDetail {
    pub fn new(
        id: PodcastId,
        title: String,
        image: Url,
        description: String,
        seasons: Vec<Season>,
        genres: Vec<u32>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self { id, title, image, description, seasons, genres, updated }
    }

    pub fn id(&self) -> &PodcastId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &Url {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn genres(&self) -> &[u32] {
        &self.genres
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
}

impl Season {
    pub fn new(title: String, episodes: u32) -> Self {
        Self { title, episodes }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn episodes(&self) -> u32 {
        self.episodes
    }
}

impl fmt::Display for PodcastSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id      : {}", self.id)?;
        writeln!(f, "Title   : {}", self.title)?;
        writeln!(f, "Image   : {}", self.image)?;
        writeln!(f, "Seasons : {}", self.seasons)?;
        writeln!(f, "Genres  : {:?}", self.genres)?;
        writeln!(f, "Updated : {}", self.updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_decodes_without_genres_field() {
        let json = r#"{
            "id": "10",
            "title": "Something Was Wrong",
            "image": "https://example.com/cover.jpg",
            "seasons": 14,
            "updated": "2022-11-03T07:00:00.000Z"
        }"#;
        let summary: PodcastSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id().as_str(), "10");
        assert!(summary.genres().is_empty());
        assert_eq!(summary.seasons(), 14);
    }

    #[test]
    fn detail_decodes_season_list() {
        let json = r#"{
            "id": "10",
            "title": "Something Was Wrong",
            "image": "https://example.com/cover.jpg",
            "description": "An award-winning docuseries.",
            "seasons": [
                {"title": "Season 1", "episodes": 10},
                {"title": "Season 2", "episodes": 12}
            ],
            "genres": [1, 2],
            "updated": "2022-11-03T07:00:00.000Z"
        }"#;
        let detail: PodcastDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.seasons().len(), 2);
        assert_eq!(detail.seasons()[0].title(), "Season 1");
        assert_eq!(detail.seasons()[1].episodes(), 12);
        assert_eq!(detail.genres(), &[1, 2]);
    }
}
