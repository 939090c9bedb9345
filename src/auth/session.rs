//! 会话解析
//!
//! 把请求头转换为显式的 [`SessionContext`]，作为参数交给访问判定

use super::jwt::SessionTokenVerifier;
use crate::{config::SecurityConfig, error::AppError, models::Principal};
use axum::http::{header, HeaderMap};

/// 交给访问判定的会话状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub principal: Option<Principal>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }
}

/// 从 Authorization 头提取令牌
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// 按名称读取 Cookie 值
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}

/// 从请求中解析当前主体
pub struct SessionResolver {
    verifier: SessionTokenVerifier,
    cookie_name: String,
}

impl SessionResolver {
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        Ok(Self {
            verifier: SessionTokenVerifier::from_config(config)?,
            cookie_name: config.session_cookie.clone(),
        })
    }

    /// 先尝试 Bearer 头，验证失败再尝试会话 Cookie；都不可用时为匿名会话
    pub fn resolve(&self, headers: &HeaderMap) -> SessionContext {
        let candidates = [
            extract_bearer(headers),
            extract_cookie(headers, &self.cookie_name),
        ];

        for token in candidates.into_iter().flatten() {
            match self.verifier.principal(&token) {
                Ok(principal) => return SessionContext::authenticated(principal),
                Err(_) => tracing::debug!("Session token present but invalid, trying next source"),
            }
        }

        SessionContext::anonymous()
    }
}
