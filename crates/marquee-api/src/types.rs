//! Wire types for the recommendation service.
//!
//! Field names mirror the service's camelCase JSON exactly; everything is
//! decoded verbatim and never mutated client-side.

use serde::{Deserialize, Serialize};

/// A movie as returned by the feed endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub movie_id: u32,
    pub title: String,
    pub release_year: i32,
    pub average_rating: f64,
    pub rating_number: u32,
    pub genres: Vec<String>,
}

/// A movie with the extended fields only `getmovie` returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub imdb_id: String,
    #[serde(default)]
    pub tmdb_id: String,
    #[serde(default)]
    pub top_ratings: Vec<RatingRecord>,
}

/// The service nests each rating one level down inside a wrapper object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub rating: Rating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default)]
    pub movie_id: u32,
    #[serde(default)]
    pub user_id: u32,
    pub score: f32,
}

/// A user with aggregate stats and their full rating history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: u32,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub highest_rating: f64,
    #[serde(default)]
    pub lowest_rating: f64,
    #[serde(default)]
    pub ratings: Vec<RatingRecord>,
}

/// One entry of the model catalog.
///
/// `is_current` is server truth — the client never flips it locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub version: String,
    pub display_name: String,
    #[serde(default)]
    pub is_current: bool,
}

/// Raw envelope of `getmodel?action=list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModelListResponse {
    pub success: bool,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub current_model: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The available models plus the server's notion of the active one.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    pub models: Vec<ModelEntry>,
    pub current: Option<String>,
}

/// Result of a switch-model request.
///
/// A rejected switch is `success: false` with a human-readable message,
/// not an error — only connectivity/decoding failures error out.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub current_model: Option<String>,
}

// ── Sort ──────────────────────────────────────────────────────────

/// Sort order accepted by the genre feed's `sortby` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Rating,
    Count,
    Recent,
}

impl SortKey {
    pub const ALL: &[SortKey] = &[Self::Rating, Self::Count, Self::Recent];

    /// The wire token sent to the service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Count => "count",
            Self::Recent => "recent",
        }
    }

    /// Parse a stored token, `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rating" => Some(Self::Rating),
            "count" => Some(Self::Count),
            "recent" => Some(Self::Recent),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rating => write!(f, "Top rated"),
            Self::Count => write!(f, "Most rated"),
            Self::Recent => write!(f, "Newest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_movie_summary() {
        let json = r#"{
            "movieId": 589,
            "title": "Terminator 2: Judgment Day",
            "releaseYear": 1991,
            "averageRating": 3.96,
            "ratingNumber": 10471,
            "genres": ["Action", "Sci-Fi"]
        }"#;

        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.movie_id, 589);
        assert_eq!(movie.release_year, 1991);
        assert_eq!(movie.genres, vec!["Action", "Sci-Fi"]);
    }

    #[test]
    fn test_deserialize_movie_details() {
        let json = r#"{
            "movieId": 1,
            "title": "Toy Story",
            "releaseYear": 1995,
            "averageRating": 3.89,
            "ratingNumber": 49695,
            "genres": ["Adventure", "Animation"],
            "imdbId": "0114709",
            "tmdbId": "862",
            "topRatings": [
                {"rating": {"movieId": 1, "userId": 12, "score": 5.0}},
                {"rating": {"movieId": 1, "userId": 34, "score": 4.5}}
            ]
        }"#;

        let movie: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(movie.summary.movie_id, 1);
        assert_eq!(movie.imdb_id, "0114709");
        assert_eq!(movie.top_ratings.len(), 2);
        assert_eq!(movie.top_ratings[1].rating.user_id, 34);
    }

    #[test]
    fn test_deserialize_user_profile() {
        // Ratings are nested one level down — the wrapper shape matters.
        let json = r#"{
            "userId": 42,
            "ratingCount": 3,
            "averageRating": 3.5,
            "highestRating": 5.0,
            "lowestRating": 2.0,
            "ratings": [
                {"rating": {"movieId": 31, "userId": 42, "score": 2.5}},
                {"rating": {"movieId": 1029, "userId": 42, "score": 3.0}}
            ]
        }"#;

        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.ratings.len(), 2);
        assert_eq!(user.ratings[0].rating.movie_id, 31);
        assert!((user.ratings[1].rating.score - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_deserialize_model_list() {
        // The envelope carries extra fields (emb file names) we don't need.
        let json = r#"{
            "success": true,
            "models": [
                {"version": "STANDARD", "displayName": "Standard", "itemEmbFile": "item2vecEmb.csv", "isCurrent": true},
                {"version": "LARGE", "displayName": "Large scale", "itemEmbFile": "itemGraphEmb.csv", "isCurrent": false}
            ],
            "currentModel": "STANDARD"
        }"#;

        let resp: ModelListResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.models.len(), 2);
        assert!(resp.models[0].is_current);
        assert_eq!(resp.current_model.as_deref(), Some("STANDARD"));
    }

    #[test]
    fn test_deserialize_switch_outcome() {
        let ok: SwitchOutcome =
            serde_json::from_str(r#"{"success": true, "message": "Switched to Large scale", "currentModel": "LARGE"}"#)
                .unwrap();
        assert!(ok.success);
        assert_eq!(ok.current_model.as_deref(), Some("LARGE"));

        let rejected: SwitchOutcome =
            serde_json::from_str(r#"{"success": false, "message": "unknown model version"}"#).unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.message, "unknown model version");
    }

    #[test]
    fn test_sort_key_tokens() {
        for &key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("releaseYear"), None);
    }
}
