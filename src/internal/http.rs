//! 内置的 HTTP 传输层实现（reqwest）。

pub mod basic_auth;
pub mod http_range_client;
