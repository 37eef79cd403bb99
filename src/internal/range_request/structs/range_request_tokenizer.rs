//! 范围请求 tokenizer
//!
//! 把解析器的 read / peek / ignore 调用转换成尽量少、尽量大的范围请求。
//!
//! ## 工作方式
//!
//! - 已下载的数据保存在 [`ChunkedFileData`] 中，重复读取同一偏移直接走缓存
//! - 缓存未命中时，请求的范围至少扩展到 `minimum_chunk_size` 字节，并截断到文件末尾
//! - 读取起点到达或超过文件末尾时返回 `EndOfFile`；`ignore` 只截断，不报错
//! - 所有可能发起请求的操作都需要 `&mut self`，同一个 tokenizer 上的读取天然串行，
//!   不会出现两个重叠的未命中各自发起一次请求
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use range_tokenizer::range_request::*;
//! # async fn example(transport: RangeRequestTransport) -> Result<(), RangeRequestError> {
//! let mut tokenizer = RangeRequestFactory::new(transport)
//!     .minimum_chunk_size(64 * 1024)
//!     .init_tokenizer()
//!     .await?;
//!
//! let mut header = [0u8; 10];
//! tokenizer.read_buffer(&mut header, ReadOptions::default()).await?;
//! tokenizer.ignore(128).await?;
//! # Ok(())
//! # }
//! ```

mod load_range;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::internal::chunked_data::structs::ChunkedFileData;
use crate::internal::range_request::traits::{RandomAccessTokenizer, RangeRequestClient};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::abort_signal::AbortSignal;
use super::byte_range::ByteRange;
use super::fetch_progress::FetchProgress;
use super::head_request_info::HeadRequestInfo;
use super::range_request_error::RangeRequestError;
use super::read_options::ReadOptions;

/// 基于范围请求的随机访问 tokenizer。
///
/// 拥有响应式属性（通过 `progress()` 获取）：记录请求次数、已下载字节数与缓存命中次数。
pub struct RangeRequestTokenizer {
    client: Arc<dyn RangeRequestClient>,
    file_info: HeadRequestInfo,
    /// 文件总大小，构造时由 `file_info.size` 确定
    size: u64,
    minimum_chunk_size: u64,
    position: u64,
    file_data: ChunkedFileData,
    abort_signal: AbortSignal,
    progress_state: UnlockReactiveProperty<FetchProgress>,
}

impl std::fmt::Debug for RangeRequestTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeRequestTokenizer")
            .field("file_info", &self.file_info)
            .field("minimum_chunk_size", &self.minimum_chunk_size)
            .field("position", &self.position)
            .field("cached_spans", &self.file_data.len())
            .finish()
    }
}

impl RangeRequestTokenizer {
    /// 创建 tokenizer。`file_info.size` 必须已知。
    pub fn new(
        client: Arc<dyn RangeRequestClient>,
        file_info: HeadRequestInfo,
        minimum_chunk_size: u64,
        abort_signal: Option<AbortSignal>,
    ) -> Result<Self, RangeRequestError> {
        let size = file_info.size.ok_or(RangeRequestError::UnknownFileSize)?;
        debug!(
            "RangeRequestTokenizer: path={:?}, size={size}, mime={:?}, minimum_chunk_size={minimum_chunk_size}",
            file_info.path, file_info.mime_type
        );

        Ok(Self {
            client,
            file_info,
            size,
            minimum_chunk_size,
            position: 0,
            file_data: ChunkedFileData::new(),
            abort_signal: abort_signal.unwrap_or_default(),
            progress_state: UnlockReactiveProperty::new(FetchProgress::default()),
        })
    }

    /// 预先放入已下载的数据（探测阶段的试探性请求）。
    pub(crate) fn with_cached_data(mut self, offset: u64, data: &[u8]) -> Self {
        self.file_data.add_data(offset, data);
        self
    }

    /// 文件总大小。
    pub fn size(&self) -> u64 {
        self.size
    }

    /// 内部缓存（只读）。
    pub fn file_data(&self) -> &ChunkedFileData {
        &self.file_data
    }

    /// 本 tokenizer 使用的取消信号；可克隆后交给其他任务。
    pub fn abort_signal(&self) -> AbortSignal {
        self.abort_signal.clone()
    }

    /// 请求统计；返回可共享句柄，`.watch()` 后 `changed().await` 监听。
    pub fn progress(&self) -> UnlockReactiveProperty<FetchProgress> {
        self.progress_state.clone()
    }

    /// 剩余可读字节数。
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.position)
    }
}

#[async_trait]
impl RandomAccessTokenizer for RangeRequestTokenizer {
    fn file_info(&self) -> &HeadRequestInfo {
        &self.file_info
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    async fn read_buffer(
        &mut self,
        buffer: &mut [u8],
        options: ReadOptions,
    ) -> Result<usize, RangeRequestError> {
        if let Some(position) = options.position {
            self.position = position;
        }
        debug!("read_buffer position={} length={:?}", self.position, options.length);

        let bytes_read = self
            .peek_buffer(buffer, options.position(self.position))
            .await?;
        self.position += bytes_read as u64;
        Ok(bytes_read)
    }

    async fn peek_buffer(
        &mut self,
        buffer: &mut [u8],
        options: ReadOptions,
    ) -> Result<usize, RangeRequestError> {
        let position = options.position.unwrap_or(self.position);
        let offset = options.offset.unwrap_or(0);
        let capacity = buffer.len();
        let available = capacity.checked_sub(offset).ok_or(
            RangeRequestError::BufferTooSmall {
                offset,
                length: options.length.unwrap_or(0),
                capacity,
            },
        )?;
        let length = options.length.unwrap_or(available);
        debug!("peek_buffer position={position} length={length}");

        if length == 0 {
            return Ok(0);
        }
        if length > available {
            return Err(RangeRequestError::BufferTooSmall {
                offset,
                length,
                capacity,
            });
        }

        let last = position
            .saturating_add(length as u64 - 1)
            .min(self.size.saturating_sub(1));
        self.load_range(ByteRange::new(position, last)).await?;

        let bytes_read = (last - position + 1) as usize;
        self.file_data
            .read_to_buffer(buffer, offset, position, bytes_read)
    }

    async fn ignore(&mut self, length: u64) -> Result<u64, RangeRequestError> {
        let skipped = length.min(self.remaining());
        self.position += skipped;
        Ok(skipped)
    }

    fn abort(&self) {
        debug!("abort: path={:?}", self.file_info.path);
        self.abort_signal.abort();
        self.client.cancel();
    }

    async fn close(&mut self) -> Result<(), RangeRequestError> {
        self.file_data.clear();
        Ok(())
    }
}
