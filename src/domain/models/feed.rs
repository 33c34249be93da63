// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// OzBargain站点源，用于拼接相对链接
pub const SITE_ORIGIN: &str = "https://www.ozbargain.com.au";

pub const COMPUTING_TOP_DEALS_URL: &str =
    "https://www.ozbargain.com.au/ozbapi/block/ozbdeal_top?dur=30&tid=12";
pub const COMPUTING_NEW_DEALS_URL: &str =
    "https://www.ozbargain.com.au/ozbapi/block/ozbdeal_new?tid=12&f=1";
pub const ELECTRONICS_TOP_DEALS_URL: &str =
    "https://www.ozbargain.com.au/ozbapi/block/ozbdeal_top?dur=30&tid=13";
pub const ELECTRONICS_NEW_DEALS_URL: &str =
    "https://www.ozbargain.com.au/ozbapi/block/ozbdeal_new?tid=13&f=1";

/// 通知展示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationMode {
    /// 每条优惠一个embed
    Detail,
    /// 单个汇总embed，附带编号链接列表
    Table,
}

impl fmt::Display for NotificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationMode::Detail => write!(f, "detail"),
            NotificationMode::Table => write!(f, "table"),
        }
    }
}

/// 订阅源
///
/// 一个(分类, 时效)组合，对应固定的来源URL和展示模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// 分类标签，写入每条提取出的优惠
    pub category: String,
    /// 来源URL
    pub url: String,
    /// 展示模式
    pub mode: NotificationMode,
}

impl Feed {
    pub fn new(category: impl Into<String>, url: impl Into<String>, mode: NotificationMode) -> Self {
        Self {
            category: category.into(),
            url: url.into(),
            mode,
        }
    }

    /// 每日执行的热门订阅源
    pub fn top_deals() -> Vec<Feed> {
        vec![
            Feed::new(
                "Computing Top Deals",
                COMPUTING_TOP_DEALS_URL,
                NotificationMode::Detail,
            ),
            Feed::new(
                "Electronics Top Deals",
                ELECTRONICS_TOP_DEALS_URL,
                NotificationMode::Detail,
            ),
        ]
    }

    /// 周期执行的最新订阅源
    pub fn new_deals() -> Vec<Feed> {
        vec![
            Feed::new(
                "Computing New Deals",
                COMPUTING_NEW_DEALS_URL,
                NotificationMode::Table,
            ),
            Feed::new(
                "Electronics New Deals",
                ELECTRONICS_NEW_DEALS_URL,
                NotificationMode::Table,
            ),
        ]
    }
}
