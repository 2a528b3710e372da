//! 日志初始化模块
//!
//! 基于 tracing-subscriber 提供结构化日志初始化，
//! 支持 JSON（生产环境）和 pretty（本地开发）两种输出格式。

use anyhow::Result;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::ObservabilityConfig;

/// 初始化全局日志订阅器
///
/// 过滤级别优先取 RUST_LOG 环境变量，其次取配置文件中的 log_level。
/// 重复初始化返回错误（tracing 全局订阅器只能设置一次）。
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    // 构建环境过滤器
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // 构建日志层
    let fmt_layer = if config.log_format == "json" {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_pretty() {
        let config = ObservabilityConfig {
            log_level: "debug".to_string(),
            log_format: "pretty".to_string(),
        };
        // 测试进程内全局订阅器可能已被其他测试设置，
        // 这里只验证初始化不会 panic。
        let _ = init_tracing(&config);
    }
}
