//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`AppResponse`] - API 响应结构
//! - [`shortid`] - 短标识符生成
//! - 日志等工具

pub mod error;
pub mod logger;
pub mod result;
pub mod shortid;

pub use error::{ok, ok_with_message, AppError, AppResponse};
pub use result::AppResult;
pub use shortid::generate_short_id;
