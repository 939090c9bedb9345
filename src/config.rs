//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:3000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 托管 PostgreSQL 的连接地址
    pub url: Secret<String>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// 托管认证服务签发会话令牌所用的密钥（HS256）
    pub jwt_secret: Secret<String>,
    /// 会话令牌期望的 `aud` 声明
    pub jwt_audience: String,
    /// 携带会话访问令牌的 Cookie
    pub session_cookie: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    /// 被拒绝访问者的跳转地址
    pub sign_in: String,
    /// 管理后台首页
    pub admin_home: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub routes: RoutesConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.jwt_audience", "authenticated")?
            .set_default("security.session_cookie", "sb-access-token")?
            .set_default("routes.sign_in", "/auth/signin")?
            .set_default("routes.admin_home", "/admin")?;

        // 从环境变量加载配置（前缀为 PHARMEX_）
        settings = settings.add_source(
            Environment::with_prefix("PHARMEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证数据库连接池配置
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        // 验证 JWT 密钥长度（至少 32 字符）
        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.security.session_cookie.trim().is_empty() {
            return Err(ConfigError::Message("session_cookie must not be empty".to_string()));
        }

        // 重定向目标必须是站内绝对路径
        for (name, route) in [
            ("routes.sign_in", &self.routes.sign_in),
            ("routes.admin_home", &self.routes.admin_home),
        ] {
            if !route.starts_with('/') {
                return Err(ConfigError::Message(format!(
                    "{} must be an absolute path, got: {}",
                    name, route
                )));
            }
        }

        // 按路径段比较，/administrators 不算在 /admin 之下
        let admin_home = self.routes.admin_home.trim_end_matches('/');
        let sign_in = &self.routes.sign_in;
        if sign_in == &self.routes.admin_home
            || sign_in.starts_with(&format!("{}/", admin_home))
        {
            return Err(ConfigError::Message(
                "routes.sign_in must not live under the gated admin_home".to_string(),
            ));
        }

        Ok(())
    }
}
