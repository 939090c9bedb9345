//! 访问判定结果

use crate::{error::AccessError, models::AdminIdentity};
use serde::Serialize;

/// 对单个会话执行解析链的结果
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    /// 重定向到登录页，原因只用于日志
    Denied(AccessError),
    /// 有效的 `admin_users` 记录
    GrantedCurrent(AdminIdentity),
    /// 标记为管理员、尚未迁移的药剂师
    GrantedLegacy {
        identity: AdminIdentity,
        warning: String,
    },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        !matches!(self, AccessDecision::Denied(_))
    }

    pub fn identity(&self) -> Option<&AdminIdentity> {
        match self {
            AccessDecision::Denied(_) => None,
            AccessDecision::GrantedCurrent(identity) => Some(identity),
            AccessDecision::GrantedLegacy { identity, .. } => Some(identity),
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            AccessDecision::GrantedLegacy { warning, .. } => Some(warning),
            _ => None,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            AccessDecision::Denied(_) => "denied",
            AccessDecision::GrantedCurrent(_) => "granted",
            AccessDecision::GrantedLegacy { .. } => "granted_legacy",
        }
    }

    pub fn into_parts(self) -> Option<(AdminIdentity, Option<String>)> {
        match self {
            AccessDecision::Denied(_) => None,
            AccessDecision::GrantedCurrent(identity) => Some((identity, None)),
            AccessDecision::GrantedLegacy { identity, warning } => Some((identity, Some(warning))),
        }
    }
}

/// 客户端门禁使用的判定 JSON 结构
#[derive(Debug, Serialize)]
pub struct AccessDecisionResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl AccessDecisionResponse {
    pub fn new(decision: AccessDecision, sign_in_route: &str) -> Self {
        let status = decision.outcome();
        match decision.into_parts() {
            Some((identity, warning)) => Self {
                status,
                admin: Some(identity),
                migration_warning: warning,
                redirect_to: None,
            },
            None => Self {
                status,
                admin: None,
                migration_warning: None,
                redirect_to: Some(sign_in_route.to_string()),
            },
        }
    }
}
