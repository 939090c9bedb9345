//! 数据模型模块
//! 从托管后端读取的行，以及交给管理视图的身份

pub mod admin;
pub mod identity;
pub mod pharmacist;

pub use admin::{AdminPermissions, AdminRecord, AdminRole};
pub use identity::{AdminIdentity, IdentitySource, Principal};
pub use pharmacist::{LegacyStaffRecord, PharmacyRef, StaffRole};
