//! Error types for the streaming ZIP reader

use std::fmt;
use std::io;

/// Result type for streaming-reader operations
pub type Result<T> = std::result::Result<T, ZipReaderError>;

/// A feature a conforming archive asked for that this reader refuses to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// The archive is a multi-segment split archive (only the single-segment marker is tolerated)
    Splitting,
    /// A data descriptor was present where the caller has not opted in to reading it
    DataDescriptor,
    /// The DEFLATE stream requested a preset dictionary
    Dictionary,
    /// The entry is encrypted (general-purpose bit 0 set)
    EncryptedContent,
    /// The entry's compression method is neither STORED nor DEFLATED
    UnknownCompressionMethod(u16),
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Splitting => write!(f, "multi-segment split archives"),
            Feature::DataDescriptor => write!(f, "data descriptor (without opt-in)"),
            Feature::Dictionary => write!(f, "DEFLATE preset dictionary"),
            Feature::EncryptedContent => write!(f, "encrypted entry content"),
            Feature::UnknownCompressionMethod(m) => write!(f, "compression method {}", m),
        }
    }
}

/// Error types that can occur while streaming a ZIP archive
#[derive(Debug)]
pub enum ZipReaderError {
    /// I/O error from the underlying source
    Io(io::Error),
    /// The source ended where a fixed number of bytes was required
    UnexpectedEof,
    /// An entry's payload ended before its declared size, or before a data
    /// descriptor signature could be located
    Truncated,
    /// A conforming-but-unsupported feature was requested
    Unsupported(Feature),
    /// The DEFLATE inflator raised a format error
    MalformedDeflate(String),
    /// The reader has already been closed
    Closed,
    /// An out-of-range argument was passed (negative skip, short buffer, ...)
    InvalidArgument(String),
}

impl fmt::Display for ZipReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZipReaderError::Io(e) => write!(f, "I/O error: {}", e),
            ZipReaderError::UnexpectedEof => write!(f, "unexpected end of stream"),
            ZipReaderError::Truncated => write!(f, "entry payload truncated"),
            ZipReaderError::Unsupported(feature) => write!(f, "unsupported: {}", feature),
            ZipReaderError::MalformedDeflate(msg) => write!(f, "malformed deflate stream: {}", msg),
            ZipReaderError::Closed => write!(f, "reader is closed"),
            ZipReaderError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for ZipReaderError {}

impl From<io::Error> for ZipReaderError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ZipReaderError::UnexpectedEof
        } else {
            ZipReaderError::Io(err)
        }
    }
}
