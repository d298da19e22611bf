//! Beer 资源

pub mod handler;
pub mod mapper;
pub mod model;
pub mod repository;
pub mod service;

pub use model::{BeerDto, BeerEntity, BeerPatchDto};
pub use repository::PgBeerRepository;
pub use service::BeerService;
