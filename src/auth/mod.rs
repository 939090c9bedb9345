//! 认证模块：会话令牌验证与会话解析

pub mod jwt;
pub mod session;

pub use jwt::{SessionClaims, SessionTokenVerifier};
pub use session::{extract_bearer, extract_cookie, SessionContext, SessionResolver};
