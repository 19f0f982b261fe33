//! 日志基础设施

use tracing_subscriber::{
    filter::{EnvFilter, ParseError},
    util::{SubscriberInitExt, TryInitError},
};

/// 日志初始化错误
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("无效的日志过滤规则: {0}")]
    Filter(#[from] ParseError),
    #[error("日志系统初始化失败: {0}")]
    Init(#[from] TryInitError),
}

pub struct Logger;

impl Logger {
    /// 安装全局日志订阅者
    ///
    /// 设置了 `RUST_LOG` 时以其为准，否则使用 `level`；sqlx 的语句日志压到 warn。
    pub fn init(level: &str) -> Result<(), LoggerError> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => Self::filter_for(level)?,
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish()
            .try_init()?;

        Ok(())
    }

    fn filter_for(level: &str) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(format!("{},sqlx=warn", level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(Logger::filter_for(level).is_ok(), "level {level}");
        }
    }
}
