//! 服务配置
//!
//! 配置来源按优先级从低到高依次为：内置默认值、`PRODUCT_SERVICE_CONFIG`
//! 指向的 TOML 文件、环境变量。

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "PRODUCT_SERVICE_CONFIG";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 服务配置结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// HTTP 服务配置
    pub http: HttpConfig,
}

/// 数据库配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 数据库文件名
    pub filename: String,
    /// 连接池最大连接数
    pub max_connections: u32,
    /// 获取连接的超时时间（秒）
    pub acquire_timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            filename: "database.db".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 8,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            timeout_seconds: 30,
        }
    }
}

impl HttpConfig {
    /// 监听地址，形如 `0.0.0.0:8080`
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// 按默认值、配置文件、环境变量的顺序加载并校验配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) => Self::default(),
        };

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// 从 TOML 配置文件加载配置，缺失的键使用默认值
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(format!("{}: {}", path.display(), e)))?;

        content.parse()
    }

    /// 用环境变量覆盖配置项
    ///
    /// `lookup` 返回指定变量的值，未设置时返回 `None`。
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filename) = lookup("DATABASE_FILE") {
            self.database.filename = filename;
        }
        if let Some(value) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = lookup("DATABASE_ACQUIRE_TIMEOUT_SECONDS") {
            self.database.acquire_timeout_seconds =
                parse_var("DATABASE_ACQUIRE_TIMEOUT_SECONDS", &value)?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(address) = lookup("HTTP_BIND_ADDRESS") {
            self.http.bind_address = address;
        }
        if let Some(value) = lookup("HTTP_PORT") {
            self.http.port = parse_var("HTTP_PORT", &value)?;
        }
        if let Some(value) = lookup("HTTP_TIMEOUT_SECONDS") {
            self.http.timeout_seconds = parse_var("HTTP_TIMEOUT_SECONDS", &value)?;
        }

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.filename.trim().is_empty() {
            return Err(ConfigError::Validation("数据库文件名不能为空".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation("最大连接数必须大于0".to_string()));
        }

        if self.database.acquire_timeout_seconds == 0 {
            return Err(ConfigError::Validation("获取连接超时时间必须大于0".to_string()));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, VALID_LOG_LEVELS
            )));
        }

        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP 端口必须大于0".to_string()));
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("环境变量 {key} 无效: {message}")]
    InvalidValue { key: String, message: String },
    #[error("配置验证错误: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.database.filename, "database.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.http.socket_addr(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = r#"
            [database]
            filename = "products.db"

            [http]
            port = 9000
        "#
        .parse()
        .unwrap();

        assert_eq!(config.database.filename, "products.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.bind_address, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml() {
        let result = "[database\nfilename = 1".parse::<Config>();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");

        let missing = Config::load_from_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("DATABASE_FILE", "/tmp/other.db"),
                ("LOG_LEVEL", "WARN"),
                ("HTTP_PORT", " 3000 "),
                ("HTTP_TIMEOUT_SECONDS", "5"),
                ("DATABASE_ACQUIRE_TIMEOUT_SECONDS", "3"),
            ]))
            .unwrap();

        assert_eq!(config.database.acquire_timeout_seconds, 3);
        assert_eq!(config.database.filename, "/tmp/other.db");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.request_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_invalid_number() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup_from(&[("HTTP_PORT", "eighty")]))
            .unwrap_err();

        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "HTTP_PORT"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.database.filename = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.database.acquire_timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
