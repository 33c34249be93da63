// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::deal::{Deal, VoteTier};
use crate::domain::models::feed::NotificationMode;
use crate::domain::models::webhook::{Embed, EmbedField, EmbedFooter, WebhookPayload};
use crate::domain::services::webhook_service::WebhookService;
use crate::utils::errors::DeliveryError;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{error, info};

/// 汇总embed颜色（OzBargain绿）
pub const TABLE_COLOR: u32 = 0x00A86B;
pub const HIGH_VOTES_COLOR: u32 = 0x00FF00;
pub const MEDIUM_VOTES_COLOR: u32 = 0xFFA500;
pub const LOW_VOTES_COLOR: u32 = 0xFF0000;

const FOOTER_TEXT: &str = "OzBargain Deal Alert";

impl VoteTier {
    pub fn color(self) -> u32 {
        match self {
            VoteTier::High => HIGH_VOTES_COLOR,
            VoteTier::Medium => MEDIUM_VOTES_COLOR,
            VoteTier::Low => LOW_VOTES_COLOR,
        }
    }
}

/// 构建汇总模式负载
///
/// 生成单个embed，标题使用第一条优惠的分类，描述为编号链接列表
pub fn build_table_payload(deals: &[Deal]) -> WebhookPayload {
    let category = deals.first().map(|d| d.category.as_str()).unwrap_or_default();

    let mut description = String::from("\n**🔗 Links:**\n");
    for (i, deal) in deals.iter().enumerate() {
        let _ = writeln!(
            description,
            "{}. [{}]({}) *({} votes)*",
            i + 1,
            deal.title,
            deal.url,
            deal.votes
        );
    }

    let embed = Embed {
        title: format!("🔥 {} Deals ({} found)", category, deals.len()),
        description: Some(description),
        color: TABLE_COLOR,
        footer: Some(EmbedFooter::new(FOOTER_TEXT)),
        ..Default::default()
    };

    WebhookPayload {
        content: None,
        embeds: vec![embed],
    }
}

/// 构建详情模式负载
///
/// 每条优惠一个embed，颜色按投票数分档
pub fn build_detail_payload(deals: &[Deal]) -> WebhookPayload {
    let embeds = deals
        .iter()
        .map(|deal| Embed {
            title: deal.title.clone(),
            url: Some(deal.url.clone()),
            description: None,
            color: deal.vote_tier().color(),
            fields: vec![
                EmbedField {
                    name: "👍 Votes".to_string(),
                    value: deal.votes.to_string(),
                    inline: true,
                },
                EmbedField {
                    name: "🕒 Posted".to_string(),
                    value: deal.timestamp.clone(),
                    inline: true,
                },
            ],
            footer: Some(EmbedFooter::new(format!(
                "{} - {}",
                FOOTER_TEXT, deal.category
            ))),
        })
        .collect();

    WebhookPayload {
        content: None,
        embeds,
    }
}

/// 按展示模式构建负载
pub fn build_payload(deals: &[Deal], mode: NotificationMode) -> WebhookPayload {
    match mode {
        NotificationMode::Table => build_table_payload(deals),
        NotificationMode::Detail => build_detail_payload(deals),
    }
}

/// 投递结果
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// 没有可发送的优惠
    Skipped,
    /// 已投递
    Delivered { count: usize },
    /// 投递失败，批次被丢弃
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

/// 通知服务
///
/// 格式化优惠并尽力投递，失败只记录日志，不向上传播
#[derive(Clone)]
pub struct Notifier {
    webhook: Arc<dyn WebhookService>,
}

impl Notifier {
    pub fn new(webhook: Arc<dyn WebhookService>) -> Self {
        Self { webhook }
    }

    /// 发送通知
    ///
    /// # 参数
    ///
    /// * `deals` - 待发送的优惠
    /// * `mode` - 展示模式
    ///
    /// # 返回值
    ///
    /// 投递结果；空列表直接跳过，不发起请求
    pub async fn notify(&self, deals: &[Deal], mode: NotificationMode) -> DeliveryOutcome {
        if deals.is_empty() {
            info!("No deals to post");
            return DeliveryOutcome::Skipped;
        }

        let payload = build_payload(deals, mode);

        match self.webhook.send_webhook(&payload).await {
            Ok(()) => {
                info!("Successfully posted {} deals to Discord", deals.len());
                DeliveryOutcome::Delivered { count: deals.len() }
            }
            Err(DeliveryError::Rejected { status, body }) => {
                error!("Discord webhook returned status {}: {}", status, body);
                DeliveryOutcome::Failed(DeliveryError::Rejected { status, body })
            }
            Err(e) => {
                error!("Error posting to Discord: {}", e);
                DeliveryOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "notification_service_test.rs"]
mod tests;
