//! Service layer.
//!
//! Services own transaction boundaries and DTO shaping; handlers only parse
//! requests and pick status codes.

pub mod category_service;
pub mod health_service;
pub mod product_service;

pub use category_service::CategoryService;
pub use health_service::HealthService;
pub use product_service::ProductService;
