//! 单次范围请求的响应：资源信息 + Content-Range + 惰性读取的响应体。

use std::fmt;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};

use super::abort_signal::AbortSignal;
use super::content_range::ContentRange;
use super::head_request_info::HeadRequestInfo;
use super::range_request_error::RangeRequestError;

/// 响应体：按块产出的字节流，只有调用 [`ResponseBody::collect`] 时才真正读取。
pub struct ResponseBody {
    stream: BoxStream<'static, Result<Bytes, RangeRequestError>>,
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

impl ResponseBody {
    /// 由已在内存中的数据构造（常用于测试或本地传输）。
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data: Bytes = data.into();
        Self {
            stream: stream::once(async move { Ok(data) }).boxed(),
        }
    }

    /// 由任意字节块流构造。
    pub fn from_stream(
        stream: impl futures_util::Stream<Item = Result<Bytes, RangeRequestError>> + Send + 'static,
    ) -> Self {
        Self {
            stream: stream.boxed(),
        }
    }

    /// 读完整个响应体，最多接收 `limit` 字节。
    ///
    /// 每收到一块都会检查取消信号；被取消或流中出错时已收到的部分直接丢弃，
    /// 调用方拿不到残缺数据，也就不会把它写进缓存。
    /// 累计超过 `limit` 时立即停止读取并返回 `IncompleteResponse`，不会等流结束。
    pub async fn collect(
        mut self,
        limit: u64,
        abort_signal: &AbortSignal,
    ) -> Result<Vec<u8>, RangeRequestError> {
        let mut out = Vec::new();
        loop {
            if abort_signal.is_aborted() {
                return Err(RangeRequestError::Cancelled);
            }
            tokio::select! {
                biased;

                _ = abort_signal.cancelled() => {
                    return Err(RangeRequestError::Cancelled);
                }
                chunk = self.stream.next() => {
                    match chunk {
                        Some(Ok(chunk)) => {
                            let received = (out.len() + chunk.len()) as u64;
                            if received > limit {
                                return Err(RangeRequestError::IncompleteResponse {
                                    expected: limit,
                                    received,
                                });
                            }
                            out.extend_from_slice(&chunk);
                        }
                        Some(Err(e)) => return Err(e),
                        None => break,
                    }
                }
            }
        }
        Ok(out)
    }
}

/// 传输层对一次 `get_response` 的回应。
#[derive(Debug)]
pub struct RangeRequestResponse {
    /// 响应中携带的资源信息（大小、MIME 类型等）
    pub info: HeadRequestInfo,
    /// 服务器返回的 Content-Range；服务器忽略了 Range 请求时为 `None`
    pub content_range: Option<ContentRange>,
    pub body: ResponseBody,
}
