//! 核心层：错误处理、中间件、响应、仓储抽象与 PATCH 合并规则

pub mod error;
pub mod extract;
pub mod middleware;
pub mod patch;
pub mod repository;
pub mod response;
pub mod service;
pub mod validation;
