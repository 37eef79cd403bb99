pub mod abort_signal;
pub mod byte_range;
pub mod content_range;
pub mod fetch_progress;
pub mod head_request_info;
pub mod range_request_config;
pub mod range_request_error;
pub mod range_request_factory;
pub mod range_request_response;
pub mod range_request_tokenizer;
pub mod range_request_transport;
pub mod read_options;

// 重导出公共类型
pub use abort_signal::AbortSignal;
pub use byte_range::ByteRange;
pub use content_range::ContentRange;
pub use fetch_progress::FetchProgress;
pub use head_request_info::HeadRequestInfo;
pub use range_request_config::RangeRequestConfig;
pub use range_request_error::{BoxedTransportError, RangeRequestError};
pub use range_request_factory::RangeRequestFactory;
pub use range_request_response::{RangeRequestResponse, ResponseBody};
pub use range_request_tokenizer::RangeRequestTokenizer;
pub use range_request_transport::RangeRequestTransport;
pub use read_options::ReadOptions;
