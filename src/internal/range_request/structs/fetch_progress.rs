/// tokenizer 的网络请求统计：响应式状态，通过 tokenizer 的 `progress()` 读取或监听。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchProgress {
    /// 已完成的范围请求次数
    pub requests: u64,
    /// 通过范围请求写入缓存的字节数
    pub bytes_fetched: u64,
    /// 直接命中缓存、未发起请求的次数
    pub cache_hits: u64,
}
