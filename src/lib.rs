//! # Brewery reactive service
//!
//! Beer 与 Customer 两类资源的 REST 服务：
//! - `core`：错误、中间件、PATCH 合并、仓储抽象等公共组件
//! - `app`：各资源的模型、服务、处理器与路由
//! - `infrastructure`：配置、日志、PostgreSQL / 内存存储与示例数据

pub mod app;
pub mod core;
pub mod infrastructure;

use std::{sync::Arc, time::Duration};

use axum::Router;

use crate::app::{
    beer::{BeerEntity, BeerService},
    customer::{CustomerEntity, CustomerService},
    AppState,
};
use crate::core::{middleware::BearerAuth, repository::CrudRepository};
use crate::infrastructure::config::Config;

/// 按配置把两个仓储装配成完整的应用路由
pub fn build_app(
    config: &Config,
    beers: Arc<dyn CrudRepository<BeerEntity>>,
    customers: Arc<dyn CrudRepository<CustomerEntity>>,
) -> Router {
    let policy = config.patch.policy;
    let state = AppState {
        beer_service: BeerService::new(beers, policy),
        customer_service: CustomerService::new(customers, policy),
    };
    let auth = BearerAuth::new(config.security.bearer_tokens.iter().cloned());

    app::create_routes(
        state,
        auth,
        Duration::from_secs(config.server.timeout_seconds),
    )
}
