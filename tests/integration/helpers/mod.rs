// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::{response::Response, routing::get, Router};
use chrono::{DateTime, Local};
use dealwatch::queue::scheduler::{Clock, ScheduledJob};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::net::TcpListener;

/// 测试用站点源
pub const TEST_ORIGIN: &str = "https://example.test";

/// 生成一条列表项
pub fn deal_item(title: &str, href: &str, timestamp: &str, votes: &str) -> String {
    format!(
        r#"<li>
            <div class="title"><a href="{href}">{title}</a></div>
            <ul class="meta">
                <li class="timestamp">{timestamp}</li>
                <li class="votes">{votes}</li>
            </ul>
        </li>"#
    )
}

/// 生成列表页
pub fn deals_page(items: &[String]) -> String {
    format!(
        r#"<html><body><div class="block"><ul class="ozblist">{}</ul></div></body></html>"#,
        items.join("\n")
    )
}

/// 生成含有一个 Latin-1 字节的列表页
///
/// 第二条标题中的 `é` 以单字节 0xE9 编码
pub fn latin1_page() -> Vec<u8> {
    let mut bytes = deals_page(&[
        deal_item("Cheap SSD", "/node/1", "17/10 09:00", "+341"),
        deal_item("Caf# Beans", "/node/2", "17/10 10:00", "+12"),
    ])
    .into_bytes();
    if let Some(marker) = bytes.iter().position(|b| *b == b'#') {
        bytes[marker] = 0xE9;
    }
    bytes
}

/// 启动提供固定页面的订阅源服务
///
/// `/broken` 返回500，`/latin1` 返回含单个非UTF-8字节的两条目页面
pub async fn start_feed_server(pages: Vec<(&'static str, String)>) -> String {
    let mut app = Router::new()
        .route(
            "/broken",
            get(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/latin1", get(|| async { latin1_page() }));

    for (path, body) in pages {
        app = app.route(
            path,
            get(move || {
                let body = body.clone();
                async move {
                    Response::builder()
                        .header("content-type", "text/html; charset=utf-8")
                        .body(body)
                        .unwrap()
                }
            }),
        );
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// 虚拟时钟
///
/// 每次等待立即把当前时间推进到目标时间，额度用完后永远挂起
pub struct FakeClock {
    now: Mutex<DateTime<Local>>,
    remaining: AtomicUsize,
    fired: Mutex<Vec<DateTime<Local>>>,
}

impl FakeClock {
    pub fn new(start: DateTime<Local>, ticks: usize) -> Self {
        Self {
            now: Mutex::new(start),
            remaining: AtomicUsize::new(ticks),
            fired: Mutex::new(Vec::new()),
        }
    }

    pub fn fired(&self) -> Vec<DateTime<Local>> {
        self.fired.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap()
    }

    async fn sleep_until(&self, deadline: DateTime<Local>) {
        let allowed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !allowed {
            std::future::pending::<()>().await;
        }

        *self.now.lock().unwrap() = deadline;
        self.fired.lock().unwrap().push(deadline);
        tokio::task::yield_now().await;
    }
}

/// 计数任务；`block` 为真时每次执行都不会结束
pub struct CountingJob {
    name: String,
    runs: AtomicUsize,
    block: bool,
}

impl CountingJob {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            runs: AtomicUsize::new(0),
            block: false,
        }
    }

    pub fn blocking(name: &str) -> Self {
        Self {
            block: true,
            ..Self::new(name)
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScheduledJob for CountingJob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.block {
            std::future::pending::<()>().await;
        }
    }
}

/// 轮询直到条件成立或超时
pub async fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
