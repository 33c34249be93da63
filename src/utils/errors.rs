// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use thiserror::Error;

/// 页面抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("请求失败 {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("响应状态异常 {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("读取响应体失败 {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTML解析错误类型
///
/// 页面字节总是按检测到的编码有损解码，HTML 解析器也不会拒绝任何输入，
/// 因此当前没有可构造的变体。保留该类型是为了让提取接口的签名保持稳定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for ParseError {}

/// Webhook投递错误类型
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("序列化负载失败: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("发送请求失败: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("读取响应体失败: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("Webhook返回状态 {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl DeliveryError {
    /// 返回远端响应的状态码（仅对被拒绝的投递有效）
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
