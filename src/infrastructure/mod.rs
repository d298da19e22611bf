//! 基础设施：配置、日志、存储与启动数据

pub mod bootstrap;
pub mod config;
pub mod database;
pub mod logger;
pub mod memory;
