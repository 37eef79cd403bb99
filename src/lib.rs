/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::remote::*;

/// 区间合并字节缓存
pub mod chunked_data {
    use crate::internal;
    pub use internal::chunked_data::structs::*;
}

/// 范围请求 tokenizer：资源探测、适配器、传输层接口与错误类型
pub mod range_request {
    use crate::internal;
    // 结构体模型
    pub use internal::range_request::structs::*;
    pub use internal::range_request::structs::range_request_config::{
        DEFAULT_INITIAL_CHUNK_SIZE, DEFAULT_MINIMUM_CHUNK_SIZE,
    };
    // 工具函数
    pub use internal::range_request::functions::*;
    // 传输层与 tokenizer 接口
    pub use internal::range_request::traits::*;
}

/// 内置的 HTTP 传输层，不强制使用，调用方可以自己实现 `RangeRequestClient`
pub mod http {
    use crate::internal;
    pub use internal::http::basic_auth::BasicAuth;
    pub use internal::http::http_range_client::{
        HttpRangeRequestClient, HttpRangeRequestClientBuilder,
    };
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
