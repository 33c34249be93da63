// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::deal::Deal;
use crate::domain::models::feed::SITE_ORIGIN;
use crate::utils::errors::ParseError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use tracing::debug;

static ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("ul.ozblist > li"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.title a"));
static TIMESTAMP_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("ul.meta li.timestamp"));
static VOTES_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("ul.meta li.votes"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must be valid")
}

/// 优惠提取服务
///
/// 负责从列表页 HTML 中提取优惠记录
#[derive(Debug, Clone)]
pub struct DealExtractor {
    /// 站点源，用于拼接相对链接
    origin: String,
}

impl Default for DealExtractor {
    fn default() -> Self {
        Self::new(SITE_ORIGIN)
    }
}

impl DealExtractor {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// 提取优惠
    ///
    /// # 参数
    ///
    /// * `html` - 页面原始字节
    /// * `category` - 写入每条记录的分类标签
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Deal>)` - 按页面顺序排列的优惠，标题或链接为空的条目被跳过
    ///
    /// 非 UTF-8 字节不会导致失败，见 [`decode_document`]
    pub fn extract(&self, html: &[u8], category: &str) -> Result<Vec<Deal>, ParseError> {
        let content = decode_document(html);
        let document = Html::parse_document(&content);

        let deals = document
            .select(&ITEM_SELECTOR)
            .filter_map(|item| self.extract_item(item, category))
            .collect();

        Ok(deals)
    }

    fn extract_item(&self, item: ElementRef<'_>, category: &str) -> Option<Deal> {
        let anchor = item.select(&TITLE_SELECTOR).next();

        let title = anchor.map(element_text).unwrap_or_default();
        let href = anchor
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .unwrap_or_default();

        if title.is_empty() || href.is_empty() {
            return None;
        }

        let timestamp = item
            .select(&TIMESTAMP_SELECTOR)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let votes = item
            .select(&VOTES_SELECTOR)
            .next()
            .map(|e| parse_votes(&element_text(e)))
            .unwrap_or(0);

        Some(Deal {
            title,
            url: resolve_url(&self.origin, href),
            timestamp,
            votes,
            category: category.to_string(),
        })
    }
}

/// 解码页面字节
///
/// 合法 UTF-8 直接借用；否则使用 chardetng 猜测编码并由 encoding_rs 有损解码，
/// 无法映射的字节被替换为 U+FFFD，单个坏字节不会丢弃整页内容。
pub fn decode_document(input: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(input) {
        return Cow::Borrowed(text);
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(input, true);
    let encoding = detector.guess(None, true);

    let (decoded, actual, had_errors) = encoding.decode(input);
    debug!(
        "Decoded non-UTF-8 page as {} (replacements: {})",
        actual.name(),
        had_errors
    );
    decoded
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 解析投票数文本，例如 "+341"
///
/// 去掉开头的 "+" 后按整数解析，失败时返回0
pub fn parse_votes(text: &str) -> u32 {
    let text = text.trim();
    let digits = text.strip_prefix('+').unwrap_or(text);
    digits.parse().unwrap_or(0)
}

/// 将相对链接拼接到站点源之后
pub fn resolve_url(origin: &str, href: &str) -> String {
    format!("{}{}", origin, href)
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
