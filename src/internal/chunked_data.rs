//! 区间合并字节缓存。
//!
//! 对外导出以 [`crate::chunked_data`] 为准，此处仅做模块划分。

pub mod structs;
