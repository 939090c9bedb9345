//! 管理员注册表领域模型

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// `admin_users.role` 中存储的管理员角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AdminRole::Admin),
            "super_admin" => Ok(AdminRole::SuperAdmin),
            other => Err(AppError::Malformed(format!("unknown admin role '{}'", other))),
        }
    }
}

/// 来自 `admin_users.permissions` 的权限文档
///
/// 只解释对象键：`{"pharmacies": true}` 授予 `pharmacies` 区域，
/// `{"all": true}` 授予全部区域
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminPermissions(pub Value);

impl AdminPermissions {
    pub fn allows(&self, area: &str) -> bool {
        let granted = |key: &str| self.0.get(key).and_then(Value::as_bool).unwrap_or(false);
        granted("all") || granted(area)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// 原始 `admin_users` 行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub admin_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub permissions: Option<Value>,
    pub department: Option<String>,
}

/// 管理员记录，只由托管后台创建和更新
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// 展示编码，如 `AD0001`
    pub admin_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: AdminRole,
    pub is_active: bool,
    pub permissions: AdminPermissions,
    pub department: Option<String>,
}

impl AdminRecord {
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }

    pub fn has_permission(&self, area: &str) -> bool {
        self.is_super_admin() || self.permissions.allows(area)
    }
}

impl TryFrom<AdminRow> for AdminRecord {
    type Error = AppError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(Self {
            role: row.role.parse()?,
            id: row.id,
            user_id: row.user_id,
            admin_id: row.admin_id,
            email: row.email,
            full_name: row.full_name,
            is_active: row.is_active,
            permissions: AdminPermissions(row.permissions.unwrap_or(Value::Null)),
            department: row.department,
        })
    }
}
