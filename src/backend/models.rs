//! Wire models for gateway responses.
//!
//! The microservices behind the gateway disagree on field casing (the review
//! service sends `Id_Review`/`SongId`, the social service camelCase, older
//! endpoints snake_case). Every tolerated spelling is declared here, once,
//! as a serde alias; the rest of the crate only ever sees the canonical
//! `ranking::models::Review`.

use crate::ranking::models::{ContentMetadata, Review};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A review as the gateway returns it, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRecord {
    #[serde(alias = "Id_Review", alias = "reviewId")]
    pub id: String,

    #[serde(default, rename = "songId", alias = "SongId", alias = "song_id")]
    pub song_id: Option<String>,

    #[serde(default, rename = "albumId", alias = "AlbumId", alias = "album_id")]
    pub album_id: Option<String>,

    #[serde(alias = "Rating", alias = "stars")]
    pub rating: u8,

    #[serde(rename = "createdAt", alias = "CreatedAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,

    /// Content snapshot some review payloads embed for the targeted song.
    #[serde(default, alias = "Song")]
    pub song: Option<ContentSnapshot>,

    /// Content snapshot some review payloads embed for the targeted album.
    #[serde(default, alias = "Album")]
    pub album: Option<ContentSnapshot>,
}

impl ReviewRecord {
    /// Attach the separately-fetched derived counts and produce the
    /// canonical review.
    pub fn into_review(self, comment_count: u32, like_count: u32) -> Review {
        let content_snapshot = self
            .song
            .or(self.album)
            .map(ContentSnapshot::into_metadata);
        Review {
            id: self.id,
            song_id: self.song_id,
            album_id: self.album_id,
            rating: self.rating,
            created_at: self.created_at,
            comment_count,
            like_count,
            content_snapshot,
        }
    }
}

/// Embedded content metadata as services spell it.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentSnapshot {
    #[serde(alias = "Title", alias = "name", alias = "Name")]
    pub title: String,

    #[serde(default, alias = "Artist", alias = "artistName")]
    pub artist: Option<String>,

    #[serde(default, alias = "Image", alias = "imageUrl", alias = "cover")]
    pub image: Option<String>,
}

impl ContentSnapshot {
    pub fn into_metadata(self) -> ContentMetadata {
        ContentMetadata {
            title: self.title,
            artist: self.artist,
            image: self.image,
        }
    }
}

/// Count responses from the social service.
#[derive(Debug, Clone, Deserialize)]
pub struct CountResponse {
    #[serde(alias = "total", alias = "Count")]
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_camel_case() {
        let record: ReviewRecord = serde_json::from_str(
            r#"{
                "id": "r1",
                "songId": "s1",
                "rating": 4,
                "createdAt": "2024-06-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, "r1");
        assert_eq!(record.song_id.as_deref(), Some("s1"));
        assert_eq!(record.album_id, None);
    }

    #[test]
    fn test_normalizes_legacy_spellings() {
        // The review service's own casing.
        let record: ReviewRecord = serde_json::from_str(
            r#"{
                "Id_Review": "r2",
                "SongId": "s2",
                "Rating": 5,
                "CreatedAt": "2024-06-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, "r2");
        assert_eq!(record.song_id.as_deref(), Some("s2"));
        assert_eq!(record.rating, 5);
    }

    #[test]
    fn test_normalizes_snake_case_album_review() {
        let record: ReviewRecord = serde_json::from_str(
            r#"{
                "reviewId": "r3",
                "album_id": "a1",
                "stars": 3,
                "created_at": "2024-06-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, "r3");
        assert_eq!(record.album_id.as_deref(), Some("a1"));
        assert_eq!(record.song_id, None);
        assert_eq!(record.rating, 3);
    }

    #[test]
    fn test_into_review_attaches_counts_and_snapshot() {
        let record: ReviewRecord = serde_json::from_str(
            r#"{
                "id": "r4",
                "songId": "s4",
                "rating": 4,
                "createdAt": "2024-06-01T10:00:00Z",
                "song": {"name": "Naima", "artistName": "John Coltrane", "cover": "img-9"}
            }"#,
        )
        .unwrap();

        let review = record.into_review(7, 11);

        assert_eq!(review.comment_count, 7);
        assert_eq!(review.like_count, 11);
        let snapshot = review.content_snapshot.unwrap();
        assert_eq!(snapshot.title, "Naima");
        assert_eq!(snapshot.artist.as_deref(), Some("John Coltrane"));
        assert_eq!(snapshot.image.as_deref(), Some("img-9"));
    }

    #[test]
    fn test_count_response_aliases() {
        let a: CountResponse = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        let b: CountResponse = serde_json::from_str(r#"{"total": 9}"#).unwrap();
        assert_eq!(a.count, 3);
        assert_eq!(b.count, 9);
    }
}
