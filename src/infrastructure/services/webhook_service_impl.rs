// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::WebhookPayload;
use crate::domain::services::webhook_service::WebhookService;
use crate::utils::errors::DeliveryError;
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use tracing::{debug, warn};

/// Discord Webhook服务实现
///
/// 单次POST投递，只有 204 No Content 视为成功
pub struct DiscordWebhookService {
    /// HTTP 客户端
    client: reqwest::Client,
    /// Webhook 地址
    url: String,
}

impl DiscordWebhookService {
    /// 创建新的 Webhook 服务实现
    pub fn new(url: impl Into<String>) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!(
                "dealwatch-webhook/",
                env!("CARGO_PKG_VERSION")
            )),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build webhook client, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl WebhookService for DiscordWebhookService {
    async fn send_webhook(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(payload)?;

        debug!(
            "Posting {} embeds ({} bytes) to webhook",
            payload.embeds.len(),
            body.len()
        );

        let response = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(DeliveryError::BodyRead)?;

        if status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}
