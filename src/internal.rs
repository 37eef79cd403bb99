pub mod chunked_data;
pub mod entrance;
pub mod http;
pub mod range_request;
pub mod states;
