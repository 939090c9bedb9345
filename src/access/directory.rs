//! 管理员与旧版员工记录的数据来源

use crate::{
    error::AppError,
    models::{AdminRecord, LegacyStaffRecord},
    repository::{AdminRepository, PharmacistRepository},
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};
use uuid::Uuid;

/// 托管后端管理表的只读视图
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// 主体对应的管理员记录，不区分是否停用
    async fn find_admin_record(&self, user_id: Uuid) -> Result<Option<AdminRecord>, AppError>;

    /// 主体对应的已废弃药剂师记录
    async fn find_legacy_staff_record(
        &self,
        user_id: Uuid,
    ) -> Result<Option<LegacyStaffRecord>, AppError>;

    async fn list_active_admins(&self) -> Result<Vec<AdminRecord>, AppError>;
}

/// 基于托管 PostgreSQL 的目录实现
pub struct PgAdminDirectory {
    admins: AdminRepository,
    pharmacists: PharmacistRepository,
}

impl PgAdminDirectory {
    pub fn new(db: PgPool) -> Self {
        Self {
            admins: AdminRepository::new(db.clone()),
            pharmacists: PharmacistRepository::new(db),
        }
    }
}

#[async_trait]
impl AdminDirectory for PgAdminDirectory {
    async fn find_admin_record(&self, user_id: Uuid) -> Result<Option<AdminRecord>, AppError> {
        self.admins.find_by_user_id(user_id).await
    }

    async fn find_legacy_staff_record(
        &self,
        user_id: Uuid,
    ) -> Result<Option<LegacyStaffRecord>, AppError> {
        self.pharmacists.find_by_user_id(user_id).await
    }

    async fn list_active_admins(&self) -> Result<Vec<AdminRecord>, AppError> {
        self.admins.list_active().await
    }
}

/// 内存目录，仅用作测试夹具
///
/// 记录查询次数，便于断言访问了哪些表
#[derive(Default)]
pub struct StaticDirectory {
    admins: HashMap<Uuid, AdminRecord>,
    staff: HashMap<Uuid, LegacyStaffRecord>,
    admin_lookups: AtomicUsize,
    legacy_lookups: AtomicUsize,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admin(mut self, record: AdminRecord) -> Self {
        self.admins.insert(record.user_id, record);
        self
    }

    pub fn with_legacy_staff(mut self, record: LegacyStaffRecord) -> Self {
        self.staff.insert(record.id, record);
        self
    }

    pub fn admin_lookups(&self) -> usize {
        self.admin_lookups.load(Ordering::Relaxed)
    }

    pub fn legacy_lookups(&self) -> usize {
        self.legacy_lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AdminDirectory for StaticDirectory {
    async fn find_admin_record(&self, user_id: Uuid) -> Result<Option<AdminRecord>, AppError> {
        self.admin_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.admins.get(&user_id).cloned())
    }

    async fn find_legacy_staff_record(
        &self,
        user_id: Uuid,
    ) -> Result<Option<LegacyStaffRecord>, AppError> {
        self.legacy_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.staff.get(&user_id).cloned())
    }

    async fn list_active_admins(&self) -> Result<Vec<AdminRecord>, AppError> {
        let mut admins: Vec<AdminRecord> =
            self.admins.values().filter(|a| a.is_active).cloned().collect();
        admins.sort_by(|a, b| a.admin_id.cmp(&b.admin_id));
        Ok(admins)
    }
}
