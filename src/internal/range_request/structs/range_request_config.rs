use serde::Deserialize;

use super::abort_signal::AbortSignal;

/// 默认探测请求大小：4KB
pub const DEFAULT_INITIAL_CHUNK_SIZE: u64 = 4 * 1024;

/// 默认最小请求大小：1KB
pub const DEFAULT_MINIMUM_CHUNK_SIZE: u64 = 1024;

/// 范围请求 tokenizer 的配置。
///
/// 可以直接构造，也可以从配置文件反序列化（缺省字段取默认值，`abort_signal` 不参与反序列化）。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RangeRequestConfig {
    /// 跳过 HEAD 元数据探测，总是用一次试探性的范围请求获取文件大小
    pub avoid_head_requests: bool,
    /// 试探性范围请求的大小（字节）
    pub initial_chunk_size: u64,
    /// 每次范围请求的最小字节数，包括试探性请求
    pub minimum_chunk_size: u64,
    /// 取消信号，转交给 tokenizer 与传输层
    #[serde(skip)]
    pub abort_signal: Option<AbortSignal>,
}

impl Default for RangeRequestConfig {
    fn default() -> Self {
        Self {
            avoid_head_requests: false,
            initial_chunk_size: DEFAULT_INITIAL_CHUNK_SIZE,
            minimum_chunk_size: DEFAULT_MINIMUM_CHUNK_SIZE,
            abort_signal: None,
        }
    }
}
