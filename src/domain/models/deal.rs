// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 优惠实体
///
/// 表示列表页中的一条优惠记录。每次抓取都会重新生成，
/// 投递完成后即被丢弃，不做持久化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// 标题，非空
    pub title: String,
    /// 绝对链接，由站点源拼接相对路径得到
    pub url: String,
    /// 页面展示的发布时间文本，不做解析
    pub timestamp: String,
    /// 投票数，缺失或无法解析时为0
    pub votes: u32,
    /// 来源分类，由调用方指定
    pub category: String,
}

/// 投票数分档
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTier {
    /// 少于100票
    Low,
    /// 100到199票
    Medium,
    /// 200票及以上
    High,
}

impl VoteTier {
    pub fn from_votes(votes: u32) -> Self {
        match votes {
            200.. => VoteTier::High,
            100..=199 => VoteTier::Medium,
            _ => VoteTier::Low,
        }
    }
}

impl Deal {
    pub fn vote_tier(&self) -> VoteTier {
        VoteTier::from_votes(self.votes)
    }
}
