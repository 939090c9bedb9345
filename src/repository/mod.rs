//! 数据仓库层

pub mod admin_repo;
pub mod pharmacist_repo;

pub use admin_repo::*;
pub use pharmacist_repo::*;
