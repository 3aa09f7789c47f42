use crate::engine::{ArticleLink, RecommendOptions, Recommender};
use crate::error::RecommendError;
use crate::index::IndexStats;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const INVALID_QUERY_MESSAGE: &str =
    "Please try entering more descriptive terms, including nouns or adjectives.";
pub const NO_MATCHES_MESSAGE: &str =
    "No articles matched your query. Try being more specific with your input.";

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub q: String,
    #[serde(default)]
    pub journal_threshold: Option<usize>,
    #[serde(default)]
    pub article_threshold: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendStatus {
    Ok,
    NoMatches,
    InvalidQuery,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    pub status: RecommendStatus,
    pub articles: Vec<ArticleLink>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.0);
        tracing::error!("API error: {}", message);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(message)),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn recommend_articles(
    State(recommender): State<Arc<Recommender>>,
    Query(req): Query<RecommendRequest>,
) -> Result<Response, AppError> {
    let defaults = *recommender.options();
    let options = RecommendOptions {
        journal_threshold: req.journal_threshold.unwrap_or(defaults.journal_threshold),
        article_threshold: req.article_threshold.unwrap_or(defaults.article_threshold),
    };

    // Similarity scoring is CPU-bound
    let query = req.q.clone();
    let outcome =
        tokio::task::spawn_blocking(move || recommender.recommend_detailed(&query, &options))
            .await?;

    let response = match outcome {
        Ok(recommendation) => {
            let status = if recommendation.articles.is_empty() {
                RecommendStatus::NoMatches
            } else {
                RecommendStatus::Ok
            };
            let body = ApiResponse::success(RecommendResponse {
                query: req.q,
                normalized: Some(recommendation.normalized),
                status,
                articles: recommendation.articles,
            });
            match status {
                RecommendStatus::NoMatches => body.with_message(NO_MATCHES_MESSAGE),
                _ => body,
            }
        }
        Err(RecommendError::InvalidQuery) => ApiResponse::success(RecommendResponse {
            query: req.q,
            normalized: None,
            status: RecommendStatus::InvalidQuery,
            articles: Vec::new(),
        })
        .with_message(INVALID_QUERY_MESSAGE),
        Err(err @ RecommendError::InvalidOptions(_)) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(err.to_string())),
            )
                .into_response());
        }
    };

    Ok(Json(response).into_response())
}

async fn get_stats(State(recommender): State<Arc<Recommender>>) -> Json<ApiResponse<IndexStats>> {
    Json(ApiResponse::success(recommender.stats()))
}

// ========== Router ==========

pub fn create_router(recommender: Arc<Recommender>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", get(recommend_articles))
        .route("/stats", get(get_stats))
        .with_state(recommender)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
