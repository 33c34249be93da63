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

use dealwatch::config::settings::Settings;
use dealwatch::domain::models::feed::Feed;
use dealwatch::domain::services::extraction_service::DealExtractor;
use dealwatch::domain::services::notification_service::Notifier;
use dealwatch::engines::reqwest_engine::ReqwestFetcher;
use dealwatch::engines::traits::PageFetcher;
use dealwatch::infrastructure::services::webhook_service_impl::DiscordWebhookService;
use dealwatch::presentation::routes;
use dealwatch::queue::scheduler::{Cadence, Scheduler, SystemClock};
use dealwatch::utils::telemetry;
use dealwatch::workers::scrape_worker::ScrapeWorker;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    // 2. Load configuration
    let settings = Settings::new()?;

    // 3. Initialize logging
    telemetry::init_telemetry(&settings.log);
    info!("Starting dealwatch...");
    if let Err(e) = dotenv {
        warn!("Error loading .env file: {}", e);
    }
    info!("Configuration loaded");

    // 4. Initialize components
    let fetcher: Arc<dyn PageFetcher> = Arc::new(ReqwestFetcher::new());
    let extractor = Arc::new(DealExtractor::default());
    let webhook = Arc::new(DiscordWebhookService::new(settings.webhook.url.clone()));
    let notifier = Arc::new(Notifier::new(webhook));

    let top_deals = Arc::new(ScrapeWorker::new(
        "top deals",
        Feed::top_deals(),
        fetcher.clone(),
        extractor.clone(),
        notifier.clone(),
    ));
    let new_deals = Arc::new(ScrapeWorker::new(
        "new deals",
        Feed::new_deals(),
        fetcher,
        extractor,
        notifier,
    ));

    // 5. Start scheduler
    let _handles = Scheduler::new(Arc::new(SystemClock), settings.schedule.run_on_startup)
        .add(Cadence::daily_at(settings.schedule.daily_hour)?, top_deals)
        .add(Cadence::every_hours(settings.schedule.interval_hours)?, new_deals)
        .start();
    info!("Scheduled scrapers started");

    // 6. Start HTTP server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server on {}", addr);

    axum::serve(listener, routes::routes())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
