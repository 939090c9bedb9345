//! 药品交易平台管理后台门禁
//! 管理后台身份解析与访问控制

pub mod access;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
