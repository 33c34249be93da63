// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 实现抓取周期：抓取、提取、通知
pub mod scrape_worker;
