pub mod parse_content_range;
pub mod round_range;

pub use parse_content_range::parse_content_range;
pub use round_range::round_range;
