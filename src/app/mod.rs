//! HTTP 应用层：资源模块与路由装配

pub mod beer;
pub mod customer;

use std::time::Duration;

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use self::{beer::BeerService, customer::CustomerService};
use crate::core::middleware::{request_logging_middleware, BearerAuth};

/// 所有处理器共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub beer_service: BeerService,
    pub customer_service: CustomerService,
}

/// 合并各资源路由并挂载公共中间件
pub fn create_routes(state: AppState, auth: BearerAuth, request_timeout: Duration) -> Router {
    Router::new()
        .merge(beer::handler::routes(auth.clone()))
        .merge(customer::handler::routes(auth))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
