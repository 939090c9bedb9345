//! 管理后台处理器，这里的路由都在门禁之后

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppError,
    gate::AdminContext,
    middleware::AppState,
    models::{AdminIdentity, AdminRecord, AdminRole},
};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub admin: AdminIdentity,
    /// 旧账号的迁移提示内联展示，不做重定向
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_warning: Option<String>,
    pub is_super_admin: bool,
}

#[derive(Serialize)]
pub struct AdminSummary {
    pub admin_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: AdminRole,
    pub department: Option<String>,
}

impl From<AdminRecord> for AdminSummary {
    fn from(record: AdminRecord) -> Self {
        Self {
            admin_id: record.admin_id,
            email: record.email,
            full_name: record.full_name,
            role: record.role,
            department: record.department,
        }
    }
}

#[derive(Serialize)]
pub struct AdminListResponse {
    pub admins: Vec<AdminSummary>,
    pub total: usize,
}

/// GET /admin
pub async fn dashboard(ctx: AdminContext) -> Json<DashboardResponse> {
    let is_super_admin = ctx.identity.is_super_admin();
    Json(DashboardResponse {
        admin: ctx.identity,
        migration_warning: ctx.warning,
        is_super_admin,
    })
}

/// GET /admin/me
pub async fn current_admin(ctx: AdminContext) -> Json<AdminIdentity> {
    Json(ctx.identity)
}

/// GET /admin/admins — super admins only
pub async fn list_admins(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
) -> Result<Json<AdminListResponse>, AppError> {
    if !ctx.identity.is_super_admin() {
        tracing::warn!(
            display_id = %ctx.identity.display_id,
            "Non super admin requested the admin roster"
        );
        return Err(AppError::Forbidden);
    }

    let admins: Vec<AdminSummary> = state
        .admin_service
        .list_active_admins()
        .await?
        .into_iter()
        .map(AdminSummary::from)
        .collect();

    Ok(Json(AdminListResponse {
        total: admins.len(),
        admins,
    }))
}
