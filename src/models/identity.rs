//! 主体与解析出的管理员身份

use super::{AdminPermissions, AdminRecord, AdminRole, LegacyStaffRecord};
use serde::Serialize;
use uuid::Uuid;

/// 当前会话的已认证身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None }
    }
}

/// 身份来源表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    AdminRegistry,
    LegacyStaff,
}

/// 受保护的管理视图可展示的信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminIdentity {
    pub user_id: Uuid,
    pub display_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: AdminRole,
    pub department: Option<String>,
    pub permissions: AdminPermissions,
    pub source: IdentitySource,
}

impl AdminIdentity {
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }

    pub fn has_permission(&self, area: &str) -> bool {
        self.is_super_admin() || self.permissions.allows(area)
    }
}

impl From<&AdminRecord> for AdminIdentity {
    fn from(record: &AdminRecord) -> Self {
        Self {
            user_id: record.user_id,
            display_id: record.admin_id.clone(),
            email: Some(record.email.clone()),
            full_name: record.full_name.clone(),
            role: record.role,
            department: record.department.clone(),
            permissions: record.permissions.clone(),
            source: IdentitySource::AdminRegistry,
        }
    }
}

impl AdminIdentity {
    /// 尚未迁移的药剂师管理员身份，用药房编码代替管理员编码
    pub fn from_legacy(principal: &Principal, record: &LegacyStaffRecord) -> Self {
        Self {
            user_id: principal.id,
            display_id: record.display_id(),
            email: principal.email.clone(),
            full_name: None,
            role: AdminRole::Admin,
            department: None,
            permissions: AdminPermissions::default(),
            source: IdentitySource::LegacyStaff,
        }
    }
}
