//! Admin registry repository (数据库访问层)

use crate::{error::AppError, models::admin::*};
use sqlx::PgPool;
use uuid::Uuid;

const ADMIN_COLUMNS: &str = r#"
    id, user_id, admin_id, email, full_name, role, is_active, permissions, department
"#;

pub struct AdminRepository {
    db: PgPool,
}

impl AdminRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 根据认证用户 ID 查找管理员记录（不过滤 is_active）
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<AdminRecord>, AppError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {} FROM admin_users WHERE user_id = $1 LIMIT 1",
            ADMIN_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(AdminRecord::try_from).transpose()
    }

    /// 列出所有启用的管理员
    pub async fn list_active(&self) -> Result<Vec<AdminRecord>, AppError> {
        let rows = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {} FROM admin_users WHERE is_active = TRUE ORDER BY admin_id",
            ADMIN_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AdminRecord::try_from).collect()
    }
}
