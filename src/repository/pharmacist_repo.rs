//! 旧版药剂师数据仓库

use crate::{error::AppError, models::pharmacist::*};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PharmacistRepository {
    db: PgPool,
}

impl PharmacistRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 根据认证用户 ID 查找药剂师记录及其所属药房
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<LegacyStaffRecord>, AppError> {
        let row = sqlx::query_as::<_, LegacyStaffRow>(
            r#"
            SELECT
                p.id,
                p.role,
                ph.id AS pharmacy_id,
                ph.display_id AS pharmacy_display_id
            FROM pharmacists p
            LEFT JOIN pharmacies ph ON ph.id = p.pharmacy_id
            WHERE p.id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(LegacyStaffRecord::try_from).transpose()
    }
}
