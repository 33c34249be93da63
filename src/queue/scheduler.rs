// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use cron::Schedule;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 触发节奏
///
/// 六段 cron 表达式（秒 分 时 日 月 周），按时钟所在时区的墙上时间解释
#[derive(Debug, Clone)]
pub struct Cadence {
    expression: String,
    schedule: Schedule,
}

impl Cadence {
    /// 由 cron 表达式创建
    pub fn cron(expression: impl Into<String>) -> Result<Self, cron::error::Error> {
        let expression = expression.into();
        let schedule = Schedule::from_str(&expression)?;
        Ok(Self {
            expression,
            schedule,
        })
    }

    /// 每天在指定小时整点触发
    pub fn daily_at(hour: u32) -> Result<Self, cron::error::Error> {
        Self::cron(format!("0 0 {} * * *", hour))
    }

    /// 在能被 `hours` 整除的整点触发，例如 6 对应 0/6/12/18 点
    pub fn every_hours(hours: u32) -> Result<Self, cron::error::Error> {
        Self::cron(format!("0 0 */{} * * *", hours))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// 计算严格晚于 `now` 的下一次触发时间
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.schedule.after(now).next()
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cron '{}'", self.expression)
    }
}

/// 时钟特质
///
/// 调度器通过它读取当前时间并等待，测试中可替换为虚拟时钟
#[async_trait]
pub trait Clock: Send + Sync {
    /// 当前本地时间
    fn now(&self) -> DateTime<Local>;

    /// 等待直到指定时间
    async fn sleep_until(&self, deadline: DateTime<Local>);
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    async fn sleep_until(&self, deadline: DateTime<Local>) {
        let wait = (deadline - Local::now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;
    }
}

/// 调度任务特质
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    /// 任务名称，用于日志
    fn name(&self) -> &str;

    /// 执行一次任务，错误需在内部处理
    async fn run(&self);
}

/// 调度条目
pub struct ScheduleEntry {
    pub cadence: Cadence,
    pub job: Arc<dyn ScheduledJob>,
}

/// 任务调度器
///
/// 每个条目独立计时，每次触发都在新任务中执行，不等待上一次完成
pub struct Scheduler<C: Clock + 'static> {
    clock: Arc<C>,
    entries: Vec<ScheduleEntry>,
    run_on_startup: bool,
}

impl<C: Clock + 'static> Scheduler<C> {
    /// 创建新的任务调度器实例
    ///
    /// # 参数
    ///
    /// * `clock` - 时钟
    /// * `run_on_startup` - 启动时是否立即执行每个条目一次
    pub fn new(clock: Arc<C>, run_on_startup: bool) -> Self {
        Self {
            clock,
            entries: Vec::new(),
            run_on_startup,
        }
    }

    /// 添加调度条目
    pub fn add(mut self, cadence: Cadence, job: Arc<dyn ScheduledJob>) -> Self {
        self.entries.push(ScheduleEntry { cadence, job });
        self
    }

    /// 启动调度器后台任务
    ///
    /// # 返回值
    ///
    /// 返回每个条目计时循环的句柄
    pub fn start(self) -> Vec<JoinHandle<()>> {
        for entry in &self.entries {
            info!("  - {}: {}", entry.job.name(), entry.cadence);
        }

        if self.run_on_startup {
            info!("Running initial scrapes...");
            for entry in &self.entries {
                spawn_run(entry.job.clone());
            }
        }

        self.entries
            .into_iter()
            .map(|entry| {
                let clock = self.clock.clone();
                tokio::spawn(run_entry(clock, entry))
            })
            .collect()
    }
}

async fn run_entry<C: Clock>(clock: Arc<C>, entry: ScheduleEntry) {
    let mut after = clock.now();
    loop {
        let Some(next) = entry.cadence.next_after(&after) else {
            warn!(
                "No upcoming time for {} ({}), stopping",
                entry.job.name(),
                entry.cadence
            );
            return;
        };
        clock.sleep_until(next).await;

        info!("Running scheduled {}...", entry.job.name());
        spawn_run(entry.job.clone());

        // Never compute from a point before the slot that just fired
        let now = clock.now();
        if now < next {
            warn!("Clock woke {} early for {}", next - now, entry.job.name());
        }
        after = now.max(next);
    }
}

fn spawn_run(job: Arc<dyn ScheduledJob>) {
    tokio::spawn(async move {
        job.run().await;
    });
}
