//! 缓存中的单段字节：起始偏移 + 数据。

/// 单段字节：在整个远程资源中的起始偏移及其数据。
///
/// 覆盖的闭区间为 `[offset, offset + data.len() - 1]`；空段不会进入缓存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSpan {
    /// 该段在资源中的起始偏移（字节）
    pub offset: u64,
    /// 该段的数据
    pub data: Vec<u8>,
}

impl ByteSpan {
    pub fn new(offset: u64, data: Vec<u8>) -> Self {
        Self { offset, data }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 最后一个字节的偏移（含）。调用方保证非空。
    pub fn end(&self) -> u64 {
        self.offset + self.len() - 1
    }

    /// 本段是否完整包含闭区间 `[start, end]`。
    pub fn contains(&self, start: u64, end: u64) -> bool {
        !self.is_empty() && self.offset <= start && end <= self.end()
    }
}
