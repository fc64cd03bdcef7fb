//! 商品目录

pub mod handler;
pub mod model;
pub mod repository;
pub mod seed;

pub use handler::AppState;
pub use model::Product;
pub use repository::{ProductRepository, RepositoryError};
