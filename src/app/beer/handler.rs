//! Beer 处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{Json, Response},
    routing::{get, post, put},
    Router,
};

use super::model::{BeerDto, BeerPatchDto};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    extract::JsonBody,
    middleware::{require_bearer_token, BearerAuth},
    response::{created, json_array},
};

pub const BEER_PATH: &str = "/api/v2/beer";
pub const BEER_PATH_ID: &str = "/api/v2/beer/:beer_id";

/// Beer 路由，写操作需要 bearer token
pub fn routes(auth: BearerAuth) -> Router<AppState> {
    let require_token = middleware::from_fn_with_state(auth, require_bearer_token);

    Router::new()
        .route(
            BEER_PATH,
            get(list_beers).merge(post(create_beer).route_layer(require_token.clone())),
        )
        .route(
            BEER_PATH_ID,
            get(get_beer_by_id).merge(
                put(update_beer)
                    .patch(patch_beer)
                    .delete(delete_beer)
                    .route_layer(require_token),
            ),
        )
}

pub async fn create_beer(
    State(state): State<AppState>,
    JsonBody(beer): JsonBody<BeerDto>,
) -> Result<Response, CoreError> {
    let saved = state.beer_service.save_new_beer(beer).await?;
    let id = saved.id.ok_or_else(|| {
        CoreError::InternalServerError("store returned a beer without an id".to_string())
    })?;

    created(format!("{}/{}", BEER_PATH, id))
}

pub async fn get_beer_by_id(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
) -> Result<Json<BeerDto>, CoreError> {
    match state.beer_service.get_beer_by_id(beer_id).await? {
        Some(beer) => Ok(Json(beer)),
        None => Err(CoreError::NotFound),
    }
}

pub async fn list_beers(State(state): State<AppState>) -> Result<Response, CoreError> {
    json_array(state.beer_service.list_beers()).await
}

pub async fn update_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
    JsonBody(beer): JsonBody<BeerDto>,
) -> Result<StatusCode, CoreError> {
    match state.beer_service.update_beer(beer_id, beer).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(CoreError::NotFound),
    }
}

pub async fn patch_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
    JsonBody(patch): JsonBody<BeerPatchDto>,
) -> Result<StatusCode, CoreError> {
    match state.beer_service.patch_beer(beer_id, patch).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(CoreError::NotFound),
    }
}

pub async fn delete_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
) -> Result<StatusCode, CoreError> {
    match state.beer_service.delete_beer_by_id(beer_id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(CoreError::NotFound),
    }
}
