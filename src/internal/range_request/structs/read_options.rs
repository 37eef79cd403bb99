/// `read_buffer` / `peek_buffer` 的可选参数，均为 `None` 时取默认值。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// 从资源的哪个位置开始读；默认当前游标
    pub position: Option<u64>,
    /// 写入目标缓冲区的起始下标；默认 0
    pub offset: Option<usize>,
    /// 读取的字节数；默认为缓冲区在 `offset` 之后的剩余容量
    pub length: Option<usize>,
}

impl ReadOptions {
    pub fn at(position: u64) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}
