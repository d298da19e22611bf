//! Customer 处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{Json, Response},
    routing::{get, post, put},
    Router,
};

use super::model::{CustomerDto, CustomerPatchDto};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    extract::JsonBody,
    middleware::{require_bearer_token, BearerAuth},
    response::{created, json_array},
};

pub const CUSTOMER_PATH: &str = "/api/v2/customer";
pub const CUSTOMER_PATH_ID: &str = "/api/v2/customer/:customer_id";

pub fn routes(auth: BearerAuth) -> Router<AppState> {
    let require_token = middleware::from_fn_with_state(auth, require_bearer_token);

    Router::new()
        .route(
            CUSTOMER_PATH,
            get(list_customers).merge(post(create_customer).route_layer(require_token.clone())),
        )
        .route(
            CUSTOMER_PATH_ID,
            get(get_customer_by_id).merge(
                put(update_customer)
                    .patch(patch_customer)
                    .delete(delete_customer)
                    .route_layer(require_token),
            ),
        )
}

pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(customer): JsonBody<CustomerDto>,
) -> Result<Response, CoreError> {
    let saved = state.customer_service.save_new_customer(customer).await?;
    let id = saved.id.ok_or_else(|| {
        CoreError::InternalServerError("store returned a customer without an id".to_string())
    })?;

    created(format!("{}/{}", CUSTOMER_PATH, id))
}

pub async fn get_customer_by_id(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<CustomerDto>, CoreError> {
    match state.customer_service.get_customer_by_id(customer_id).await? {
        Some(customer) => Ok(Json(customer)),
        None => Err(CoreError::NotFound),
    }
}

pub async fn list_customers(State(state): State<AppState>) -> Result<Response, CoreError> {
    json_array(state.customer_service.list_customers()).await
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    JsonBody(customer): JsonBody<CustomerDto>,
) -> Result<StatusCode, CoreError> {
    match state.customer_service.update_customer(customer_id, customer).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(CoreError::NotFound),
    }
}

pub async fn patch_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    JsonBody(patch): JsonBody<CustomerPatchDto>,
) -> Result<StatusCode, CoreError> {
    match state.customer_service.patch_customer(customer_id, patch).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(CoreError::NotFound),
    }
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<StatusCode, CoreError> {
    match state.customer_service.delete_customer_by_id(customer_id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(CoreError::NotFound),
    }
}
