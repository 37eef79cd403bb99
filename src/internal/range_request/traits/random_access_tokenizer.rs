//! 随机访问 tokenizer 接口：解析器通过它顺序或跳跃地读取字节，不关心数据从哪里来。

use async_trait::async_trait;

use crate::internal::range_request::structs::{
    HeadRequestInfo, RangeRequestError, ReadOptions,
};

#[async_trait]
pub trait RandomAccessTokenizer: Send {
    /// 资源信息。
    fn file_info(&self) -> &HeadRequestInfo;

    /// 当前游标位置。
    fn position(&self) -> u64;

    /// 直接设置游标，实现随机访问。
    fn set_position(&mut self, position: u64);

    fn supports_random_access(&self) -> bool {
        true
    }

    /// 读取数据到 `buffer` 并推进游标，返回实际读取的字节数。
    async fn read_buffer(
        &mut self,
        buffer: &mut [u8],
        options: ReadOptions,
    ) -> Result<usize, RangeRequestError>;

    /// 与 `read_buffer` 相同，但不移动游标。
    async fn peek_buffer(
        &mut self,
        buffer: &mut [u8],
        options: ReadOptions,
    ) -> Result<usize, RangeRequestError>;

    /// 跳过 `length` 字节，到达末尾时截断；返回实际跳过的字节数，从不报错。
    async fn ignore(&mut self, length: u64) -> Result<u64, RangeRequestError>;

    /// 取消进行中的请求。
    fn abort(&self);

    /// 释放资源。
    async fn close(&mut self) -> Result<(), RangeRequestError>;
}
