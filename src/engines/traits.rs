// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::utils::errors::FetchError;
use async_trait::async_trait;
use bytes::Bytes;

/// 页面抓取特质
///
/// 只负责按URL取回原始字节，不关心内容格式
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 抓取页面
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
