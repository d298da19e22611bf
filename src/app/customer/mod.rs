//! Customer 资源

pub mod handler;
pub mod mapper;
pub mod model;
pub mod repository;
pub mod service;

pub use model::{CustomerDto, CustomerEntity, CustomerPatchDto};
pub use repository::PgCustomerRepository;
pub use service::CustomerService;
