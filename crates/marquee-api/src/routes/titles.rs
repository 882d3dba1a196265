use axum::Json;
use axum::extract::{Path, State};
use marquee_service::{PrincipalWithPerson, RoleFilter};

use crate::error::ApiError;
use crate::state::AppState;

use super::blocking;

pub async fn people(
    State(state): State<AppState>,
    Path(tconst): Path<String>,
) -> Result<Json<Vec<PrincipalWithPerson>>, ApiError> {
    principals(&state, tconst, RoleFilter::All).await
}

pub async fn crew(
    State(state): State<AppState>,
    Path(tconst): Path<String>,
) -> Result<Json<Vec<PrincipalWithPerson>>, ApiError> {
    principals(&state, tconst, RoleFilter::Crew).await
}

pub async fn cast(
    State(state): State<AppState>,
    Path(tconst): Path<String>,
) -> Result<Json<Vec<PrincipalWithPerson>>, ApiError> {
    principals(&state, tconst, RoleFilter::Cast).await
}

async fn principals(
    state: &AppState,
    tconst: String,
    role: RoleFilter,
) -> Result<Json<Vec<PrincipalWithPerson>>, ApiError> {
    let principals =
        blocking(state, move |service| service.principals_for_title(&tconst, role)).await?;
    Ok(Json(principals))
}
