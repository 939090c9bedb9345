//! axum 中间件形式的管理后台门禁
//!
//! 每个受保护路由的请求都执行完整判定，导航之间不做缓存

use crate::{access::AccessDecision, error::AppError, middleware::AppState, models::AdminIdentity};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// 携带旧账号迁移提示的响应头
pub const MIGRATION_WARNING_HEADER: &str = "x-admin-migration-warning";

/// Identity of the admin behind a gated request (附加到请求扩展)
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub identity: AdminIdentity,
    pub warning: Option<String>,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AdminContext
impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

pub async fn admin_gate_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = state.sessions.resolve(req.headers());
    let decision = state.access_policy.decide(&session).await;

    if let AccessDecision::Denied(reason) = &decision {
        tracing::info!(
            path = %req.uri().path(),
            reason = reason.kind(),
            "Admin gate denied request, redirecting to sign-in"
        );
    }

    let Some((identity, warning)) = decision.into_parts() else {
        return Redirect::to(&state.config.routes.sign_in).into_response();
    };

    req.extensions_mut().insert(AdminContext {
        identity,
        warning: warning.clone(),
    });

    let mut response = next.run(req).await;

    if let Some(warning) = warning {
        match HeaderValue::from_str(&warning) {
            Ok(value) => {
                response.headers_mut().insert(MIGRATION_WARNING_HEADER, value);
            }
            Err(_) => tracing::warn!("Migration warning is not a valid header value"),
        }
    }

    response
}
