use crate::internal::range_request::structs::ByteRange;

/// 把范围扩展到至少 `minimum_chunk_size` 字节：起点不变，只向后延伸终点。
///
/// 每次请求的主要开销在建立连接，取 10 字节和取 1KB 差别不大，多取的部分留给后续顺序读。
pub fn round_range(range: ByteRange, minimum_chunk_size: u64) -> ByteRange {
    let length = minimum_chunk_size.max(range.len());
    ByteRange::new(range.start, range.start + length.max(1) - 1)
}
