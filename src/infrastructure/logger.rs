//! 日志基础设施

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub struct Logger;

impl Logger {
    /// 初始化全局日志
    ///
    /// 设置了 `RUST_LOG` 时以其为准，否则使用配置中的级别。
    /// 重复初始化会被忽略。
    pub fn init(level: &str) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", level)));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).compact())
            .try_init();
    }
}
