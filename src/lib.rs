//! 维修工单门户
//! 浏览器会话与后端 API 之间的服务端渲染前端

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod telemetry;
pub mod views;
