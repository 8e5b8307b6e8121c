use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::types::{
    ModelCatalog, ModelListResponse, MovieDetails, MovieSummary, SortKey, SwitchOutcome,
    UserProfile,
};

/// Client for the recommendation service.
///
/// Cheap to clone; every call is a single best-effort round trip. Callers
/// own retry and resilience policy.
#[derive(Debug, Clone)]
pub struct RecClient {
    base_url: Url,
    http: Client,
}

impl RecClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "recommendation API error");
            Err(ApiError::Status { status, body })
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ApiError> {
        let resp = Self::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Top movies for one genre, ordered by the given sort key.
    pub async fn genre_feed(
        &self,
        genre: &str,
        size: u32,
        sort: SortKey,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        let resp = self
            .http
            .get(self.endpoint("getrecommendation")?)
            .query(&[
                ("genre", genre),
                ("sortby", sort.as_str()),
                ("size", &size.to_string()),
            ])
            .send()
            .await?;

        Self::decode(resp).await
    }

    /// Movies similar to the given movie, per the named embedding model.
    pub async fn similar_movies(
        &self,
        movie_id: u32,
        size: u32,
        model: &str,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        let resp = self
            .http
            .get(self.endpoint("getsimilarmovie")?)
            .query(&[
                ("model", model),
                ("movieId", &movie_id.to_string()),
                ("size", &size.to_string()),
            ])
            .send()
            .await?;

        Self::decode(resp).await
    }

    /// Personalized recommendations for one user.
    pub async fn recommendations_for(
        &self,
        user_id: u32,
        size: u32,
        model: &str,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        let resp = self
            .http
            .get(self.endpoint("getrecforyou")?)
            .query(&[
                ("model", model),
                ("id", &user_id.to_string()),
                ("size", &size.to_string()),
            ])
            .send()
            .await?;

        Self::decode(resp).await
    }

    /// A single movie with its extended detail fields.
    pub async fn movie(&self, movie_id: u32) -> Result<MovieDetails, ApiError> {
        let resp = self
            .http
            .get(self.endpoint("getmovie")?)
            .query(&[("id", &movie_id.to_string())])
            .send()
            .await?;

        Self::decode(resp).await
    }

    /// A single user: aggregate stats plus their full rating history.
    pub async fn user(&self, user_id: u32) -> Result<UserProfile, ApiError> {
        let resp = self
            .http
            .get(self.endpoint("getuser")?)
            .query(&[("id", &user_id.to_string())])
            .send()
            .await?;

        Self::decode(resp).await
    }

    /// The model catalog plus the server's current active model.
    ///
    /// A `success: false` envelope carries no usable catalog, so it maps to
    /// `ApiError::Rejected` with the server's message.
    pub async fn list_models(&self) -> Result<ModelCatalog, ApiError> {
        let resp = self
            .http
            .get(self.endpoint("getmodel")?)
            .query(&[("action", "list")])
            .send()
            .await?;

        let raw: ModelListResponse = Self::decode(resp).await?;
        if raw.success {
            Ok(ModelCatalog {
                models: raw.models,
                current: raw.current_model,
            })
        } else {
            Err(ApiError::Rejected(
                raw.message
                    .unwrap_or_else(|| "model list unavailable".into()),
            ))
        }
    }

    /// Ask the server to activate a different model version.
    ///
    /// A rejected switch resolves to `Ok` with `success: false` — the
    /// distinction between rejection and failure matters to callers.
    pub async fn switch_model(&self, version: &str) -> Result<SwitchOutcome, ApiError> {
        let resp = self
            .http
            .post(self.endpoint("getmodel")?)
            .form(&[("action", "switch"), ("version", version)])
            .send()
            .await?;

        Self::decode(resp).await
    }
}
