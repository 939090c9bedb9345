//! 由 [`super::AccessPolicy`] 依次尝试的解析策略

use super::directory::AdminDirectory;
use crate::{
    error::AppError,
    models::{AdminIdentity, Principal},
};
use async_trait::async_trait;
use std::sync::Arc;

/// 仍通过药剂师账号登录的管理员看到的提示
pub const LEGACY_ADMIN_WARNING: &str = "You are signed in with a legacy pharmacist admin account. \
     Ask a super admin to move you to the admin registry; legacy admin access will be removed.";

/// 解析成功的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Grant {
    Current(AdminIdentity),
    Legacy {
        identity: AdminIdentity,
        warning: String,
    },
}

/// 把主体解析为管理员身份的一种方式
///
/// `Ok(None)` 表示此处没有记录，继续下一个策略
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, principal: &Principal) -> Result<Option<Grant>, AppError>;
}

/// 在 `admin_users` 中查找主体
pub struct AdminRegistryResolver {
    directory: Arc<dyn AdminDirectory>,
}

impl AdminRegistryResolver {
    pub fn new(directory: Arc<dyn AdminDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl IdentityResolver for AdminRegistryResolver {
    fn name(&self) -> &'static str {
        "admin_registry"
    }

    async fn resolve(&self, principal: &Principal) -> Result<Option<Grant>, AppError> {
        let Some(record) = self.directory.find_admin_record(principal.id).await? else {
            return Ok(None);
        };

        // 停用记录视同不存在
        if !record.is_active {
            tracing::debug!(
                user_id = %principal.id,
                admin_id = %record.admin_id,
                "Inactive admin record ignored"
            );
            return Ok(None);
        }

        Ok(Some(Grant::Current(AdminIdentity::from(&record))))
    }
}

/// 在已废弃的 `pharmacists` 表中查找主体
pub struct LegacyStaffResolver {
    directory: Arc<dyn AdminDirectory>,
    warning: String,
}

impl LegacyStaffResolver {
    pub fn new(directory: Arc<dyn AdminDirectory>) -> Self {
        Self {
            directory,
            warning: LEGACY_ADMIN_WARNING.to_string(),
        }
    }
}

#[async_trait]
impl IdentityResolver for LegacyStaffResolver {
    fn name(&self) -> &'static str {
        "legacy_staff"
    }

    async fn resolve(&self, principal: &Principal) -> Result<Option<Grant>, AppError> {
        let Some(record) = self.directory.find_legacy_staff_record(principal.id).await? else {
            return Ok(None);
        };

        if !record.is_admin() {
            return Ok(None);
        }

        tracing::warn!(
            user_id = %principal.id,
            pharmacy = %record.display_id(),
            "Admin access granted through legacy pharmacist role"
        );

        Ok(Some(Grant::Legacy {
            identity: AdminIdentity::from_legacy(principal, &record),
            warning: self.warning.clone(),
        }))
    }
}
