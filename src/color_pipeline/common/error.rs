use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Missing required tag: {0}")]
    MissingTag(String),

    #[error("Unknown calibration illuminant: {0}")]
    UnknownIlluminant(String),

    #[error("Malformed tag {tag}: {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("Matrix is not invertible: {0}")]
    SingularMatrix(String),

    #[error("Invalid white point: {0}")]
    InvalidWhitePoint(String),

    #[error("Failed to parse tag metadata: {0}")]
    TagParseError(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode pixel data: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Pixel container holds {0} datasets, select one explicitly")]
    AmbiguousDataset(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProcessingError>;
