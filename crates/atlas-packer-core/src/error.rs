use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasPackerError {
    #[error("nothing to pack")]
    Empty,
    #[error("too many input images: {count} exceeds the cap of {cap}")]
    TooManyImages { count: usize, cap: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("no candidate atlas size satisfies the configuration")]
    SizeSpaceExhausted,
    #[error("atlas would exceed the maximum dimensions {max_width}x{max_height}")]
    MaxDimensionsExceeded { max_width: i32, max_height: i32 },
    #[error("packing cancelled")]
    Cancelled,
    #[error("encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, AtlasPackerError>;
