//! 传输层接口：真正执行范围请求与元数据探测的一方，由调用方实现（或使用内置的 HTTP 实现）。

use async_trait::async_trait;

use crate::internal::range_request::structs::{
    ByteRange, HeadRequestInfo, RangeRequestError, RangeRequestResponse,
};

/// 范围请求客户端。
///
/// `range` 为 `None` 时请求整个资源。重试策略由实现方决定，上层不做重试。
#[async_trait]
pub trait RangeRequestClient: Send + Sync {
    async fn get_response(
        &self,
        method: &str,
        range: Option<ByteRange>,
    ) -> Result<RangeRequestResponse, RangeRequestError>;

    /// 中止所有进行中的请求。默认无操作，上层仍会把被取消的请求视为失败。
    fn cancel(&self) {}
}

/// 可选能力：廉价的元数据探测（HTTP 中对应 HEAD 请求）。
#[async_trait]
pub trait HeadInfoClient: Send + Sync {
    async fn get_head_info(&self) -> Result<HeadRequestInfo, RangeRequestError>;
}
