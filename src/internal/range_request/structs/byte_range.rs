/// 闭区间字节范围 `[start, end]`，对应 HTTP `Range: bytes=start-end`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// 范围内的字节数。
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// `end < start` 的倒置范围视为空。
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// 把上界截断到 `last`（含）。
    pub fn clamp_end(self, last: u64) -> Self {
        Self {
            start: self.start,
            end: self.end.min(last),
        }
    }

    /// HTTP Range 请求头的值。
    pub fn to_header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}
