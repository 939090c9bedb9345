//! 管理员身份解析与访问判定

pub mod decision;
pub mod directory;
pub mod policy;
pub mod resolver;

pub use decision::{AccessDecision, AccessDecisionResponse};
pub use directory::{AdminDirectory, PgAdminDirectory, StaticDirectory};
pub use policy::AccessPolicy;
pub use resolver::{
    AdminRegistryResolver, Grant, IdentityResolver, LegacyStaffResolver, LEGACY_ADMIN_WARNING,
};
