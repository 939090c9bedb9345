//! 供客户端门禁使用的访问查询接口（不受门禁保护）

use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::{access::AccessDecisionResponse, middleware::AppState};

/// GET /api/v1/access
///
/// 与管理后台门禁相同的判定，以数据返回而不是重定向
pub async fn current_access(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<AccessDecisionResponse> {
    let session = state.sessions.resolve(&headers);
    let decision = state.access_policy.decide(&session).await;

    Json(AccessDecisionResponse::new(decision, &state.config.routes.sign_in))
}
