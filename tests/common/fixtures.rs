//! Gateway fixture data for end-to-end tests.
//!
//! Fixtures describe what the stub gateway serves: the review corpus, the
//! per-review derived counts (including scripted failures), and the content
//! catalog. Builders return `&mut Self` so tests read as a script.

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct GatewayFixtures {
    pub reviews: Vec<Value>,
    pub comment_counts: HashMap<String, u32>,
    pub reaction_counts: HashMap<String, u32>,
    /// Review ids whose count endpoints answer 500.
    pub failing_comment_counts: HashSet<String>,
    /// (kind, id) -> content payload.
    pub content: HashMap<(String, String), Value>,
}

impl GatewayFixtures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a song review created `age_hours` hours ago.
    pub fn song_review(&mut self, id: &str, song_id: &str, rating: u8, age_hours: i64) -> &mut Self {
        let created_at = (Utc::now() - Duration::hours(age_hours)).to_rfc3339();
        self.reviews.push(json!({
            "id": id,
            "songId": song_id,
            "rating": rating,
            "createdAt": created_at,
        }));
        self
    }

    /// Add an album review created `age_hours` hours ago, in the review
    /// service's own legacy casing to exercise normalization end to end.
    pub fn album_review(
        &mut self,
        id: &str,
        album_id: &str,
        rating: u8,
        age_hours: i64,
    ) -> &mut Self {
        let created_at = (Utc::now() - Duration::hours(age_hours)).to_rfc3339();
        self.reviews.push(json!({
            "Id_Review": id,
            "AlbumId": album_id,
            "Rating": rating,
            "CreatedAt": created_at,
        }));
        self
    }

    /// Add a review without any content reference (bad data the grouper
    /// must drop while it still counts toward corpus size).
    pub fn untargeted_review(&mut self, id: &str, rating: u8) -> &mut Self {
        self.reviews.push(json!({
            "id": id,
            "rating": rating,
            "createdAt": Utc::now().to_rfc3339(),
        }));
        self
    }

    /// Attach a content snapshot to the most recently added review.
    pub fn with_song_snapshot(&mut self, title: &str, artist: &str) -> &mut Self {
        let review = self.reviews.last_mut().expect("no review to annotate");
        review["song"] = json!({ "title": title, "artist": artist });
        self
    }

    pub fn with_comment_count(&mut self, review_id: &str, count: u32) -> &mut Self {
        self.comment_counts.insert(review_id.to_string(), count);
        self
    }

    pub fn with_reaction_count(&mut self, review_id: &str, count: u32) -> &mut Self {
        self.reaction_counts.insert(review_id.to_string(), count);
        self
    }

    /// Make the comment-count endpoint fail for one review.
    pub fn failing_comment_count(&mut self, review_id: &str) -> &mut Self {
        self.failing_comment_counts.insert(review_id.to_string());
        self
    }

    /// Register a song in the content service.
    pub fn song_content(&mut self, id: &str, title: &str, artist: &str) -> &mut Self {
        self.content.insert(
            ("song".to_string(), id.to_string()),
            json!({ "title": title, "artist": artist, "image": format!("img-{}", id) }),
        );
        self
    }

    /// Register an album in the content service.
    pub fn album_content(&mut self, id: &str, title: &str, artist: &str) -> &mut Self {
        self.content.insert(
            ("album".to_string(), id.to_string()),
            json!({ "title": title, "artist": artist, "image": format!("img-{}", id) }),
        );
        self
    }
}
