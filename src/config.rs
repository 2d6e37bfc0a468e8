//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use url::Url;

/// 会话密钥最小长度（私有 Cookie 需要 64 字节主密钥）
pub const SESSION_SECRET_MIN_LEN: usize = 64;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:3000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// 后端 API 基础地址，例如 "http://localhost:8080"
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 会话 Cookie 加密密钥（使用 Secret 包装，防止日志泄露）
    pub secret: Secret<String>,
    /// 会话 Cookie 名称
    pub cookie_name: String,
    /// 是否只在 HTTPS 下发送 Cookie
    pub secure_cookie: bool,
    /// 空闲过期时间（秒），0 表示随浏览器会话结束
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("backend.base_url", "http://localhost:8080")?
            .set_default(
                "session.secret",
                "change-this-session-secret-in-production-it-must-be-at-least-64-chars!",
            )?
            .set_default("session.cookie_name", "portal.sid")?
            .set_default("session.secure_cookie", false)?
            .set_default("session.idle_timeout_secs", 0)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?;

        // 从环境变量加载配置（前缀为 PORTAL_）
        settings = settings.add_source(
            Environment::with_prefix("PORTAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if port_str.parse::<u16>().is_err() {
                return Err(ConfigError::Message(format!(
                    "Invalid server address: {}",
                    self.server.addr
                )));
            }
        }

        let url = Url::parse(&self.backend.base_url).map_err(|e| {
            ConfigError::Message(format!("Invalid backend base_url {}: {}", self.backend.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::Message(format!(
                    "Backend base_url must use http or https, got: {}",
                    other
                )))
            }
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        if self.session.secret.expose_secret().len() < SESSION_SECRET_MIN_LEN {
            return Err(ConfigError::Message(format!(
                "Session secret must be at least {} characters long",
                SESSION_SECRET_MIN_LEN
            )));
        }

        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::Message("Session cookie_name must not be empty".to_string()));
        }

        Ok(())
    }

    /// 后端基础地址（去掉末尾斜杠）
    pub fn backend_base_url(&self) -> &str {
        self.backend.base_url.trim_end_matches('/')
    }
}
