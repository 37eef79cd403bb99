/// 与某个闭区间「重叠或相邻」的一串连续段在缓存中的下标范围。
///
/// - `start_ix..=end_ix`：需要被合并替换的段；无重叠时两者均为 `None`
/// - `insert_ix`：无重叠时新段应插入的位置（保持 offset 升序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start_ix: Option<usize>,
    pub end_ix: Option<usize>,
    pub insert_ix: usize,
}

impl ChunkRange {
    /// 是否找到了重叠（或相邻）的段。
    pub fn is_found(&self) -> bool {
        self.start_ix.is_some()
    }
}
