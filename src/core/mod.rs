//! 核心层：错误处理、响应包装、中间件与标识符

pub mod error;
pub mod middleware;
pub mod object_id;
pub mod response;
