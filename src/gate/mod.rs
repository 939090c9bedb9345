//! 门禁：访问判定完成前不展示受保护的管理内容

pub mod middleware;
pub mod mount;

pub use middleware::{admin_gate_middleware, AdminContext, MIGRATION_WARNING_HEADER};
pub use mount::{Gate, GateStatus, GateView, Placeholder};
