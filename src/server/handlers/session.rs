use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, QueryAPI, SearchAPI, VoiceAPI};
use crate::entities::{QueryRole, Route, Snapshot};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct SetQueryParams {
    pub text: String,
}

pub async fn set_query(
    Extension(api): Extension<DynAPI>,
    Path(role): Path<String>,
    Json(params): Json<SetQueryParams>,
) -> Result<Json<Snapshot>, Error> {
    let role: QueryRole = role.parse()?;

    api.set_query(role, params.text).await;

    Ok(api.snapshot().await.into())
}

pub async fn search(Extension(api): Extension<DynAPI>) -> Result<Json<Option<Route>>, Error> {
    let route = api.search().await?;

    Ok(route.into())
}

pub async fn capture(
    Extension(api): Extension<DynAPI>,
    Path(role): Path<String>,
) -> Result<Json<String>, Error> {
    let role: QueryRole = role.parse()?;

    let transcript = api.capture_query(role).await?;

    Ok(transcript.into())
}

pub async fn state(Extension(api): Extension<DynAPI>) -> Json<Snapshot> {
    api.snapshot().await.into()
}
