use axum::Json;
use axum::extract::{Path, State};
use marquee_service::Title;

use crate::error::ApiError;
use crate::state::AppState;

use super::blocking;

pub async fn titles(
    State(state): State<AppState>,
    Path(nconst): Path<String>,
) -> Result<Json<Vec<Title>>, ApiError> {
    let titles = blocking(&state, move |service| service.titles_for_person(&nconst)).await?;
    Ok(Json(titles))
}
