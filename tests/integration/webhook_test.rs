// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dealwatch::domain::models::deal::Deal;
use dealwatch::domain::models::feed::NotificationMode;
use dealwatch::domain::services::notification_service::{
    build_table_payload, DeliveryOutcome, Notifier,
};
use dealwatch::domain::services::webhook_service::WebhookService;
use dealwatch::infrastructure::services::webhook_service_impl::DiscordWebhookService;
use dealwatch::utils::errors::DeliveryError;
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_deals() -> Vec<Deal> {
    vec![
        Deal {
            title: "Cheap SSD".to_string(),
            url: "https://example.test/node/1".to_string(),
            timestamp: "17/10/2026 - 09:00".to_string(),
            votes: 341,
            category: "Computing Top Deals".to_string(),
        },
        Deal {
            title: "Monitor".to_string(),
            url: "https://example.test/node/2".to_string(),
            timestamp: "17/10/2026 - 10:00".to_string(),
            votes: 12,
            category: "Computing Top Deals".to_string(),
        },
    ]
}

async fn start_webhook(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_no_content_is_success() {
    let server = start_webhook(204, "").await;
    let service = DiscordWebhookService::new(format!("{}/webhook", server.uri()));

    let payload = build_table_payload(&sample_deals());
    service.send_webhook(&payload).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["embeds"].as_array().unwrap().len(), 1);
    assert_eq!(
        sent["embeds"][0]["title"],
        "🔥 Computing Top Deals Deals (2 found)"
    );
    assert!(sent.get("content").is_none());
}

#[tokio::test]
async fn test_ok_status_is_still_a_failure() {
    let server = start_webhook(200, "ok").await;
    let service = DiscordWebhookService::new(format!("{}/webhook", server.uri()));

    let err = service
        .send_webhook(&build_table_payload(&sample_deals()))
        .await
        .unwrap_err();

    match err {
        DeliveryError::Rejected { status, body } => {
            assert_eq!(status, 200);
            assert_eq!(body, "ok");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_client_error_captures_status_and_body() {
    let server = start_webhook(400, r#"{"message":"Invalid Form Body"}"#).await;
    let service = DiscordWebhookService::new(format!("{}/webhook", server.uri()));

    let err = service
        .send_webhook(&build_table_payload(&sample_deals()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Invalid Form Body"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = DiscordWebhookService::new(format!("http://{}/webhook", addr));
    let err = service
        .send_webhook(&build_table_payload(&sample_deals()))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(_)));
}

#[tokio::test]
async fn test_notifier_detail_mode_end_to_end() {
    let server = start_webhook(204, "").await;
    let notifier = Notifier::new(Arc::new(DiscordWebhookService::new(format!(
        "{}/webhook",
        server.uri()
    ))));

    let outcome = notifier
        .notify(&sample_deals(), NotificationMode::Detail)
        .await;
    assert!(matches!(outcome, DeliveryOutcome::Delivered { count: 2 }));

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let embeds = sent["embeds"].as_array().unwrap();
    assert_eq!(embeds.len(), 2);
    assert_eq!(embeds[0]["url"], "https://example.test/node/1");
    assert_eq!(embeds[0]["color"], 0x00FF00);
    assert_eq!(embeds[1]["color"], 0xFF0000);
    assert_eq!(embeds[0]["fields"][0]["value"], "341");
    assert_eq!(
        embeds[0]["footer"]["text"],
        "OzBargain Deal Alert - Computing Top Deals"
    );
}

#[tokio::test]
async fn test_notifier_failure_does_not_propagate() {
    let server = start_webhook(500, "boom").await;
    let notifier = Notifier::new(Arc::new(DiscordWebhookService::new(format!(
        "{}/webhook",
        server.uri()
    ))));

    let outcome = notifier
        .notify(&sample_deals(), NotificationMode::Table)
        .await;

    match outcome {
        DeliveryOutcome::Failed(DeliveryError::Rejected { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_notifier_empty_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = Notifier::new(Arc::new(DiscordWebhookService::new(format!(
        "{}/webhook",
        server.uri()
    ))));

    let outcome = notifier.notify(&[], NotificationMode::Detail).await;
    assert!(matches!(outcome, DeliveryOutcome::Skipped));
    server.verify().await;
}

/// 读取完整请求后回应声明了100字节、实际只发送部分内容的响应并断开
async fn start_truncating_webhook() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }

        socket
            .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/webhook", addr)
}

#[tokio::test]
async fn test_truncated_response_body_is_body_read_error() {
    let service = DiscordWebhookService::new(start_truncating_webhook().await);

    let err = service
        .send_webhook(&build_table_payload(&sample_deals()))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::BodyRead(_)));
    assert_eq!(err.status(), None);
}
