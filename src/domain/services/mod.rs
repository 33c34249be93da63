// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含HTML提取、通知格式化与Webhook投递接口
pub mod extraction_service;
pub mod notification_service;
pub mod webhook_service;
