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

use crate::engines::traits::PageFetcher;
use crate::utils::errors::FetchError;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Instant;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("dealwatch/", env!("CARGO_PKG_VERSION"));

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取器，共享同一个客户端
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        // No explicit timeout: a stalled feed only stalls its own cycle
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build fetch client, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(Bytes)` - 2xx响应的原始内容
    /// * `Err(FetchError)` - 请求失败、状态异常或读取响应体失败
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        debug!(
            "Fetched {} ({} bytes) in {}ms",
            url,
            content.len(),
            start.elapsed().as_millis()
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
