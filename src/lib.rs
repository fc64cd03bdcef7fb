//! # 商品目录服务
//!
//! 以 HTTP 接口暴露商品目录：列表、按 id 查询、按分类查询、创建、更新、删除。
//! - `app`：商品模型、仓储接口及其实现、请求处理器
//! - `core`：错误处理、响应包装、中间件、标识符
//! - `infrastructure`：数据库连接池与日志
//! - `config`：配置加载与校验

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::build_router;
pub use app::catalog::{AppState, Product, ProductRepository, RepositoryError};
pub use crate::core::object_id::ObjectId;
