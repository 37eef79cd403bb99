pub mod byte_span;
pub mod chunk_range;
pub mod chunked_file_data;

pub use byte_span::ByteSpan;
pub use chunk_range::ChunkRange;
pub use chunked_file_data::ChunkedFileData;
