//! 业务逻辑服务层

pub mod admin_service;

pub use admin_service::AdminService;
