/// 解析后的 `Content-Range` 响应头：`bytes first-last/total`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub first_byte_position: u64,
    pub last_byte_position: u64,
    /// 资源总大小；服务器用 `*` 表示未知时为 `None`
    pub instance_length: Option<u64>,
}

impl ContentRange {
    /// 本次响应实际携带的字节数。
    pub fn len(&self) -> u64 {
        self.last_byte_position
            .saturating_sub(self.first_byte_position)
            + 1
    }

    pub fn is_empty(&self) -> bool {
        self.last_byte_position < self.first_byte_position
    }
}
