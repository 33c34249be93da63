// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::WebhookPayload;
use crate::utils::errors::DeliveryError;
use async_trait::async_trait;

/// Webhook服务特质
///
/// 定义Webhook发送的核心逻辑
#[async_trait]
pub trait WebhookService: Send + Sync {
    /// 发送Webhook负载
    ///
    /// # 参数
    ///
    /// * `payload` - 消息负载
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 远端已接受
    /// * `Err(DeliveryError)` - 发送失败或远端拒绝
    async fn send_webhook(&self, payload: &WebhookPayload) -> Result<(), DeliveryError>;
}
