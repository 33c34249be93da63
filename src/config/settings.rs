// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::utils::telemetry::DEFAULT_LOG_FILTER;

/// 应用程序配置设置
///
/// 包含服务器、Webhook和调度等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// Webhook 配置
    pub webhook: WebhookSettings,
    /// 调度配置
    pub schedule: ScheduleSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// Webhook配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSettings {
    /// Discord Webhook地址
    pub url: String,
}

/// 调度配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    /// 每日热门抓取的触发小时（本地时间）
    pub daily_hour: u32,
    /// 最新抓取的间隔小时数，按整点对齐
    pub interval_hours: u32,
    /// 启动时是否立即执行一次
    pub run_on_startup: bool,
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// 人类可读的文本
    Text,
    /// 每行一个 JSON 对象
    Json,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 过滤规则，语法同 `RUST_LOG`
    pub filter: String,
    /// 输出格式
    pub format: LogFormat,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件、`DEALWATCH__*` 环境变量，
    /// 最后由 `PORT` 与 `DISCORD_WEBHOOK_URL` 覆盖
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DEALWATCH").separator("__"))
            .set_override_option("server.port", non_empty_var("PORT"))?
            .set_override_option("webhook.url", non_empty_var("DISCORD_WEBHOOK_URL"))?;

        Self::from_builder(builder)
    }

    /// 带有默认值的配置构建器
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("schedule.daily_hour", 9)?
            .set_default("schedule.interval_hours", 6)?
            .set_default("schedule.run_on_startup", true)?
            .set_default("log.filter", DEFAULT_LOG_FILTER)?
            .set_default("log.format", "text")
    }

    /// 从构建器生成配置并校验
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.webhook.url).map_err(|e| {
            ConfigError::Message(format!("webhook.url is not a valid URL: {}", e))
        })?;

        if self.schedule.daily_hour >= 24 {
            return Err(ConfigError::Message(format!(
                "schedule.daily_hour must be below 24, got {}",
                self.schedule.daily_hour
            )));
        }

        if !(1..=24).contains(&self.schedule.interval_hours) {
            return Err(ConfigError::Message(format!(
                "schedule.interval_hours must be between 1 and 24, got {}",
                self.schedule.interval_hours
            )));
        }

        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
