//! 范围请求领域模块：资源探测、tokenizer 适配器、传输层接口。
//!
//! 使用方式：`RangeRequestFactory::new(transport).minimum_chunk_size(n).init_tokenizer().await`
//! 对外导出以 [`crate::range_request`] 为准，此处仅做模块划分，不重复 pub use。

pub mod functions;
pub mod structs;
pub mod traits;
