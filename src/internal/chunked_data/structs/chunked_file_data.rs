//! 区间合并缓存：保存已下载的字节段，回答「某范围是否已在内存」并按偏移拷出数据。
//!
//! 内部的段列表始终满足：
//! - 按 `offset` 升序
//! - 互不重叠
//! - 互不相邻（相邻的两段在插入时就会被合并，任意两段之间至少隔 1 个字节）

use std::iter;

use crate::internal::range_request::structs::RangeRequestError;

use super::byte_span::ByteSpan;
use super::chunk_range::ChunkRange;

/// 分段文件数据缓存。生命周期与持有它的 tokenizer 相同。
#[derive(Debug, Clone, Default)]
pub struct ChunkedFileData {
    spans: Vec<ByteSpan>,
}

impl ChunkedFileData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前缓存的全部段（只读）。
    pub fn spans(&self) -> &[ByteSpan] {
        &self.spans
    }

    /// 段数。
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// 已缓存的总字节数。
    pub fn cached_bytes(&self) -> u64 {
        self.spans.iter().map(ByteSpan::len).sum()
    }

    /// 清空缓存。
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// 写入一段数据，与所有重叠或相邻的已有段合并成一段。
    ///
    /// 合并时新数据优先，已有段只补齐新数据未覆盖到的位置。空数据直接忽略。
    pub fn add_data(&mut self, offset: u64, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let end = offset + data.len() as u64 - 1;
        let range = self.chunk_range(offset, end);

        let (start_ix, end_ix) = match (range.start_ix, range.end_ix) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                self.spans
                    .insert(range.insert_ix, ByteSpan::new(offset, data.to_vec()));
                return;
            }
        };

        let union_start = self.spans[start_ix].offset.min(offset);
        let union_end = self.spans[end_ix].end().max(end);
        let mut merged = vec![0u8; (union_end - union_start + 1) as usize];

        for span in &self.spans[start_ix..=end_ix] {
            let at = (span.offset - union_start) as usize;
            merged[at..at + span.data.len()].copy_from_slice(&span.data);
        }
        let at = (offset - union_start) as usize;
        merged[at..at + data.len()].copy_from_slice(data);

        self.spans.splice(
            start_ix..=end_ix,
            iter::once(ByteSpan::new(union_start, merged)),
        );
    }

    /// 是否有**单个**段完整覆盖闭区间 `[start, end]`。
    ///
    /// 跨两段的请求即使两段并集能覆盖也返回 `false`，调用方需要补齐中间的缺口。
    pub fn has_data_range(&self, start: u64, end: u64) -> bool {
        self.find_containing(start, end).is_some()
    }

    /// 把 `[position, position + length - 1]` 拷贝到 `target[target_offset..]`，返回拷贝的字节数。
    ///
    /// 调用前应先用 [`Self::has_data_range`] 确认数据已在缓存中，否则返回 `RangeNotLoaded`。
    pub fn read_to_buffer(
        &self,
        target: &mut [u8],
        target_offset: usize,
        position: u64,
        length: usize,
    ) -> Result<usize, RangeRequestError> {
        if length == 0 {
            return Ok(0);
        }
        let capacity = target.len();
        if target_offset.checked_add(length).is_none_or(|end| end > capacity) {
            return Err(RangeRequestError::BufferTooSmall {
                offset: target_offset,
                length,
                capacity,
            });
        }

        let end = position + length as u64 - 1;
        let span = self
            .find_containing(position, end)
            .ok_or(RangeRequestError::RangeNotLoaded { position, length })?;

        let from = (position - span.offset) as usize;
        target[target_offset..target_offset + length]
            .copy_from_slice(&span.data[from..from + length]);
        Ok(length)
    }

    /// 查找与 `[start, end]` 重叠或相邻的连续段。
    ///
    /// 段列表有序且互有间隔，所以满足条件的段必然连续，两次二分即可定位。
    pub fn chunk_range(&self, start: u64, end: u64) -> ChunkRange {
        let first = self
            .spans
            .partition_point(|s| s.end().saturating_add(1) < start);
        let after_last = self
            .spans
            .partition_point(|s| s.offset <= end.saturating_add(1));

        if first < after_last {
            ChunkRange {
                start_ix: Some(first),
                end_ix: Some(after_last - 1),
                insert_ix: first,
            }
        } else {
            ChunkRange {
                start_ix: None,
                end_ix: None,
                insert_ix: first,
            }
        }
    }

    fn find_containing(&self, start: u64, end: u64) -> Option<&ByteSpan> {
        if end < start {
            return None;
        }
        let ix = self.spans.partition_point(|s| s.offset <= start);
        let span = self.spans.get(ix.checked_sub(1)?)?;
        span.contains(start, end).then_some(span)
    }
}
