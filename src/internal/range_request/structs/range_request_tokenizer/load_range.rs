//! 缓存未命中时的范围加载：截断、取整、发起请求、写入缓存。

use log::{debug, warn};

use crate::internal::range_request::functions::round_range;
use crate::internal::range_request::structs::{ByteRange, RangeRequestError};

use super::RangeRequestTokenizer;

impl RangeRequestTokenizer {
    /// 保证 `range` 在返回 `Ok` 后已完整位于单个缓存段中。
    ///
    /// 被取消、出错、返回范围不符或数据长度不符的请求都不会写入缓存；响应体超过请求长度时立即中止读取。
    /// 传输层错误原样返回，不重试。
    pub(crate) async fn load_range(&mut self, range: ByteRange) -> Result<(), RangeRequestError> {
        if range.start >= self.size {
            return Err(RangeRequestError::EndOfFile);
        }
        debug!("request range {}..{}", range.start, range.end);

        let last = self.size - 1;
        let range = range.clamp_end(last);
        debug!("adjusted range {}..{}", range.start, range.end);

        if self.file_data.has_data_range(range.start, range.end) {
            debug!("read from cache");
            self.progress_state.update_field(|p| p.cache_hits += 1);
            return Ok(());
        }

        let range = round_range(range, self.minimum_chunk_size).clamp_end(last);
        debug!("blocked range {}..{}", range.start, range.end);

        let client = self.client.clone();
        let response = self
            .abort_signal
            .until_aborted(client.get_response("GET", Some(range)))
            .await?;

        // 服务器忽略 Range 时返回的是整个文件，不读响应体直接拒绝
        let content_range = response.content_range.ok_or_else(|| {
            warn!(
                "no content-range for {}..{}, server ignored the range request",
                range.start, range.end
            );
            RangeRequestError::PartialFetchUnsupported
        })?;
        if content_range.first_byte_position != range.start
            || content_range.last_byte_position != range.end
        {
            warn!(
                "discard response for {}..{}: content-range is {}..{}",
                range.start,
                range.end,
                content_range.first_byte_position,
                content_range.last_byte_position
            );
            return Err(RangeRequestError::RangeMismatch {
                requested_start: range.start,
                requested_end: range.end,
                received_start: content_range.first_byte_position,
                received_end: content_range.last_byte_position,
            });
        }

        let data = response.body.collect(range.len(), &self.abort_signal).await?;

        let received = data.len() as u64;
        if received != range.len() {
            warn!(
                "discard response for {}..{}: expected {} bytes, received {received}",
                range.start,
                range.end,
                range.len()
            );
            return Err(RangeRequestError::IncompleteResponse {
                expected: range.len(),
                received,
            });
        }

        self.file_data.add_data(range.start, &data);
        self.progress_state.update_field(|p| {
            p.requests += 1;
            p.bytes_fetched += received;
        });
        Ok(())
    }
}
