//! 后端 API 客户端
//! 所有业务数据都由后端持有，本层只负责转发

pub mod client;
pub mod endpoint;

pub use client::{BackendClient, BackendError, Credentials};
pub use endpoint::{AuthPolicy, Endpoint};
