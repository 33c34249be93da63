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

use crate::domain::models::feed::Feed;
use crate::domain::services::extraction_service::DealExtractor;
use crate::domain::services::notification_service::{DeliveryOutcome, Notifier};
use crate::engines::traits::PageFetcher;
use crate::queue::scheduler::ScheduledJob;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 单个订阅源的处理结果
#[derive(Debug)]
pub enum FeedOutcome {
    /// 抓取失败
    FetchFailed,
    /// 解析失败，页面按有损解码处理，目前不会出现
    ParseFailed,
    /// 已提取并交给通知服务
    Processed {
        found: usize,
        delivery: DeliveryOutcome,
    },
}

/// 抓取工作器
///
/// 一次周期按顺序处理若干订阅源，某个订阅源失败不影响其余订阅源
pub struct ScrapeWorker {
    /// 名称，用于日志
    name: String,
    /// 订阅源
    feeds: Vec<Feed>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<DealExtractor>,
    notifier: Arc<Notifier>,
}

impl ScrapeWorker {
    /// 创建新的抓取工作器实例
    pub fn new(
        name: impl Into<String>,
        feeds: Vec<Feed>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<DealExtractor>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            name: name.into(),
            feeds,
            fetcher,
            extractor,
            notifier,
        }
    }

    /// 执行一次抓取周期
    ///
    /// # 返回值
    ///
    /// 每个订阅源的处理结果，顺序与订阅源一致
    pub async fn run_cycle(&self) -> Vec<FeedOutcome> {
        info!("Scraping {}...", self.name);

        let mut outcomes = Vec::with_capacity(self.feeds.len());
        for feed in &self.feeds {
            outcomes.push(self.process_feed(feed).await);
        }
        outcomes
    }

    async fn process_feed(&self, feed: &Feed) -> FeedOutcome {
        debug!(
            "Fetching {} from {} via {}",
            feed.category,
            feed.url,
            self.fetcher.name()
        );
        let body = match self.fetcher.fetch(&feed.url).await {
            Ok(body) => body,
            Err(e) => {
                error!("Error scraping {}: {}", feed.category, e);
                return FeedOutcome::FetchFailed;
            }
        };

        let deals = match self.extractor.extract(&body, &feed.category) {
            Ok(deals) => deals,
            Err(e) => {
                error!("Error parsing deals for {}: {}", feed.category, e);
                return FeedOutcome::ParseFailed;
            }
        };

        info!(
            "Found {} deals for {} ({} mode)",
            deals.len(),
            feed.category,
            feed.mode
        );
        let delivery = self.notifier.notify(&deals, feed.mode).await;

        FeedOutcome::Processed {
            found: deals.len(),
            delivery,
        }
    }
}

#[async_trait]
impl ScheduledJob for ScrapeWorker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) {
        let outcomes = self.run_cycle().await;
        let delivered = outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    FeedOutcome::Processed { delivery, .. } if delivery.is_delivered()
                )
            })
            .count();
        info!(
            "Finished {}: {}/{} feeds delivered",
            self.name,
            delivered,
            outcomes.len()
        );
    }
}
