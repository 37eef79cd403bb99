//! 范围请求相关错误类型。

use thiserror::Error;

/// 传输层返回的任意错误，原样向上传递。
pub type BoxedTransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RangeRequestError {
    /// 读取起点已到达或超过资源末尾。
    #[error("已到达文件末尾")]
    EndOfFile,

    /// 服务器不支持范围请求，构造 tokenizer 时即失败，重试无意义。
    #[error("服务器不支持 Range 请求")]
    PartialFetchUnsupported,

    #[error("无法解析 Content-Range: {0:?}")]
    MalformedContentRange(String),

    /// 探测结束后仍无法得知资源总大小。
    #[error("无法确定文件大小")]
    UnknownFileSize,

    #[error("传输失败: {0}")]
    Transport(#[source] BoxedTransportError),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP 状态码异常: {0}")]
    HttpStatus(u16),

    #[error("请求被取消")]
    Cancelled,

    /// 响应体长度与请求的范围不一致，视为失败，数据不会进入缓存。
    #[error("响应数据不完整：期望 {expected} 字节，实际 {received} 字节")]
    IncompleteResponse { expected: u64, received: u64 },

    /// 服务器返回的 Content-Range 与请求的范围不一致，数据不会进入缓存。
    #[error("返回范围与请求不符：请求 {requested_start}-{requested_end}，返回 {received_start}-{received_end}")]
    RangeMismatch {
        requested_start: u64,
        requested_end: u64,
        received_start: u64,
        received_end: u64,
    },

    /// 内部错误：拷贝前数据尚未进入缓存。通过公开接口不应出现。
    #[error("数据尚未加载: position={position}, length={length}")]
    RangeNotLoaded { position: u64, length: usize },

    #[error("目标缓冲区不足: offset={offset}, length={length}, capacity={capacity}")]
    BufferTooSmall {
        offset: usize,
        length: usize,
        capacity: usize,
    },

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

impl RangeRequestError {
    /// 包装自定义传输层的错误。
    pub fn transport(err: impl Into<BoxedTransportError>) -> Self {
        Self::Transport(err.into())
    }
}
