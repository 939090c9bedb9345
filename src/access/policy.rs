//! 访问判定：基于显式会话的有序解析链

use super::{
    decision::AccessDecision,
    directory::AdminDirectory,
    resolver::{AdminRegistryResolver, Grant, IdentityResolver, LegacyStaffResolver},
};
use crate::{auth::SessionContext, error::AccessError};
use std::sync::Arc;

pub struct AccessPolicy {
    resolvers: Vec<Arc<dyn IdentityResolver>>,
}

impl AccessPolicy {
    pub fn new(resolvers: Vec<Arc<dyn IdentityResolver>>) -> Self {
        Self { resolvers }
    }

    /// 先查管理员注册表，再查旧版药剂师管理员
    pub fn standard(directory: Arc<dyn AdminDirectory>) -> Self {
        Self::new(vec![
            Arc::new(AdminRegistryResolver::new(directory.clone())) as Arc<dyn IdentityResolver>,
            Arc::new(LegacyStaffResolver::new(directory)),
        ])
    }

    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// 判定会话能否访问管理页面
    ///
    /// 解析器依次执行，第一个授权生效；查询失败直接判定为拒绝，不重试
    pub async fn decide(&self, session: &SessionContext) -> AccessDecision {
        let decision = self.evaluate(session).await;

        let outcome = match &decision {
            AccessDecision::Denied(reason) => reason.kind(),
            granted => granted.outcome(),
        };
        metrics::counter!("admin_access_decisions_total", "outcome" => outcome).increment(1);

        decision
    }

    async fn evaluate(&self, session: &SessionContext) -> AccessDecision {
        let Some(principal) = &session.principal else {
            tracing::debug!("No principal in session, denying");
            return AccessDecision::Denied(AccessError::NoPrincipal);
        };

        for resolver in &self.resolvers {
            match resolver.resolve(principal).await {
                Ok(Some(Grant::Current(identity))) => {
                    tracing::debug!(
                        user_id = %principal.id,
                        resolver = resolver.name(),
                        display_id = %identity.display_id,
                        "Admin access granted"
                    );
                    return AccessDecision::GrantedCurrent(identity);
                }
                Ok(Some(Grant::Legacy { identity, warning })) => {
                    return AccessDecision::GrantedLegacy { identity, warning };
                }
                Ok(None) => continue,
                Err(e) => {
                    tracing::error!(
                        user_id = %principal.id,
                        resolver = resolver.name(),
                        error = %e,
                        "Admin identity lookup failed, denying"
                    );
                    return AccessDecision::Denied(AccessError::LookupFailed(e.to_string()));
                }
            }
        }

        tracing::info!(user_id = %principal.id, "Principal has no admin record, denying");
        AccessDecision::Denied(AccessError::NotAuthorized)
    }
}
