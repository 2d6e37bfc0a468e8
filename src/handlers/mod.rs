//! HTTP 处理器模块

pub mod auth;
pub mod clientes;
pub mod dashboard;
pub mod health;
pub mod ordens;
pub mod usuarios;
