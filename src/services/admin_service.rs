//! 管理员注册表辅助服务
//!
//! 门禁之外对 `admin_users` 的单点检查；停用记录一律不计入，
//! 与访问判定保持一致

use crate::{access::AdminDirectory, error::AppError, models::AdminRecord};
use std::sync::Arc;
use uuid::Uuid;

pub struct AdminService {
    directory: Arc<dyn AdminDirectory>,
}

impl AdminService {
    pub fn new(directory: Arc<dyn AdminDirectory>) -> Self {
        Self { directory }
    }

    /// 获取启用的管理员资料
    pub async fn get_admin_profile(&self, user_id: Uuid) -> Result<Option<AdminRecord>, AppError> {
        let record = self.directory.find_admin_record(user_id).await?;
        Ok(record.filter(|r| r.is_active))
    }

    /// 检查用户是否是管理员
    pub async fn is_admin(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.get_admin_profile(user_id).await?.is_some())
    }

    /// 检查用户是否是超级管理员
    pub async fn is_super_admin(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self
            .get_admin_profile(user_id)
            .await?
            .is_some_and(|r| r.is_super_admin()))
    }

    /// 检查管理员是否拥有某个区域的权限
    pub async fn has_permission(&self, user_id: Uuid, area: &str) -> Result<bool, AppError> {
        Ok(self
            .get_admin_profile(user_id)
            .await?
            .is_some_and(|r| r.has_permission(area)))
    }

    /// 检查权限，如果无权限则返回错误
    pub async fn require_permission(&self, user_id: Uuid, area: &str) -> Result<(), AppError> {
        if !self.has_permission(user_id, area).await? {
            tracing::warn!(user_id = %user_id, area = %area, "Permission denied");
            return Err(AppError::Forbidden);
        }
        Ok(())
    }

    pub async fn list_active_admins(&self) -> Result<Vec<AdminRecord>, AppError> {
        self.directory.list_active_admins().await
    }
}
