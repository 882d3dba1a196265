mod health;
mod people;
mod titles;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use marquee_service::QueryError;

use crate::error::ApiError;
use crate::state::{AppState, SharedService};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/people/{nconst}/titles", get(people::titles))
        .route("/titles/{tconst}/people", get(titles::people))
        .route("/titles/{tconst}/crew", get(titles::crew))
        .route("/titles/{tconst}/cast", get(titles::cast))
}

/// Run a service call on the blocking pool, bounded by the request timeout.
///
/// The timeout abandons the response, not the store call: the blocking task
/// runs to completion in the background.
async fn blocking<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&SharedService) -> Result<T, QueryError> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(&state.service);
    let task = tokio::task::spawn_blocking(move || call(&*service));

    match tokio::time::timeout(state.request_timeout, task).await {
        Err(_) => Err(ApiError::Timeout(state.request_timeout)),
        Ok(Err(e)) => Err(ApiError::Internal(e.to_string())),
        Ok(Ok(result)) => Ok(result?),
    }
}
