//! HTTP 处理器

pub mod access;
pub mod admin;
pub mod health;
