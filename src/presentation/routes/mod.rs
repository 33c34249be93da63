// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// 健康检查返回的消息
pub const HEALTH_MESSAGE: &str = "OzBargain Scraper is running";

/// API响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// 只表示进程存活，不反映抓取或投递状态
pub async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse {
        message: HEALTH_MESSAGE.to_string(),
        timestamp: Utc::now(),
        data: None,
    })
}
