pub mod random_access_tokenizer;
pub mod range_request_client;

pub use random_access_tokenizer::RandomAccessTokenizer;
pub use range_request_client::{HeadInfoClient, RangeRequestClient};
