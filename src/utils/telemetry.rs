// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{LogFormat, LogSettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认日志过滤规则
pub const DEFAULT_LOG_FILTER: &str = "info,dealwatch=debug";

/// 初始化日志
///
/// `RUST_LOG` 存在时优先于配置中的过滤规则；`json` 格式便于日志采集
pub fn init_telemetry(settings: &LogSettings) {
    let json = settings.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(log_filter(settings))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

/// 构建过滤器，配置中的规则无效时退回默认规则
pub fn log_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
