//! 路由注册
//! 创建所有路由并应用中间件

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer};

use crate::{gate, handlers, middleware::AppState};

/// 受保护接口只接收 GET 请求
const MAX_BODY_BYTES: usize = 16 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin_home = state.config.routes.admin_home.trim_end_matches('/').to_string();

    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/v1/access", get(handlers::access::current_access));

    // 管理后台：每次请求都重新执行访问判定
    let admin_routes = Router::new()
        .route(&admin_home, get(handlers::admin::dashboard))
        .route(&format!("{}/me", admin_home), get(handlers::admin::current_admin))
        .route(&format!("{}/admins", admin_home), get(handlers::admin::list_admins))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            gate::admin_gate_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
