// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含优惠实体、提取与通知服务
pub mod domain;

/// 引擎模块
///
/// 实现页面抓取
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如Discord Webhook
pub mod infrastructure;

/// 表示层模块
///
/// 处理健康检查HTTP请求
pub mod presentation;

/// 调度模块
///
/// 按节奏触发抓取周期
pub mod queue;

/// 工具模块
///
/// 提供错误类型和遥测初始化
pub mod utils;

/// 工作器模块
///
/// 实现抓取周期
pub mod workers;
