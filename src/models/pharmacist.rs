//! 旧版药剂师员工记录
//!
//! `admin_users` 出现之前，管理员是 `role = 'admin'` 的药剂师；
//! 账号迁移期间才读取这些记录

use crate::error::AppError;
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Staff,
    Admin,
}

impl FromStr for StaffRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" | "pharmacist" => Ok(StaffRole::Staff),
            "admin" => Ok(StaffRole::Admin),
            other => Err(AppError::Malformed(format!("unknown staff role '{}'", other))),
        }
    }
}

/// 员工所属药房
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PharmacyRef {
    pub id: Uuid,
    /// 展示编码，如 `PH0002`
    pub display_id: String,
}

/// 关联药房后的原始 `pharmacists` 行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LegacyStaffRow {
    pub id: Uuid,
    pub role: String,
    pub pharmacy_id: Option<Uuid>,
    pub pharmacy_display_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyStaffRecord {
    /// 与主体 ID 相同
    pub id: Uuid,
    pub role: StaffRole,
    pub pharmacy: Option<PharmacyRef>,
}

impl LegacyStaffRecord {
    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    /// 药房展示编码，药房记录不存在时退回记录 ID
    pub fn display_id(&self) -> String {
        self.pharmacy
            .as_ref()
            .map(|p| p.display_id.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

impl TryFrom<LegacyStaffRow> for LegacyStaffRecord {
    type Error = AppError;

    fn try_from(row: LegacyStaffRow) -> Result<Self, Self::Error> {
        let pharmacy = match (row.pharmacy_id, row.pharmacy_display_id) {
            (Some(id), Some(display_id)) => Some(PharmacyRef { id, display_id }),
            _ => None,
        };

        Ok(Self {
            id: row.id,
            role: row.role.parse()?,
            pharmacy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion_and_display_id() {
        let id = Uuid::new_v4();
        let pharmacy_id = Uuid::new_v4();
        let record = LegacyStaffRecord::try_from(LegacyStaffRow {
            id,
            role: "admin".to_string(),
            pharmacy_id: Some(pharmacy_id),
            pharmacy_display_id: Some("PH0002".to_string()),
        })
        .unwrap();

        assert!(record.is_admin());
        assert_eq!(record.display_id(), "PH0002");

        let orphan = LegacyStaffRecord::try_from(LegacyStaffRow {
            id,
            role: "staff".to_string(),
            pharmacy_id: None,
            pharmacy_display_id: None,
        })
        .unwrap();
        assert!(!orphan.is_admin());
        assert_eq!(orphan.display_id(), id.to_string());
    }

    #[test]
    fn test_unknown_role_is_malformed() {
        let row = LegacyStaffRow {
            id: Uuid::new_v4(),
            role: "owner".to_string(),
            pharmacy_id: None,
            pharmacy_display_id: None,
        };
        assert!(matches!(LegacyStaffRecord::try_from(row), Err(AppError::Malformed(_))));
    }
}
