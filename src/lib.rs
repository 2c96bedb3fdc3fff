//! # zip-stream-reader: a forward-only streaming ZIP reader
//!
//! `zip-stream-reader` reads ZIP archives from any [`std::io::Read`] source
//! in a single forward pass, without seeking and without ever requiring the
//! central directory. It is meant for the sources a regular ZIP library
//! can't open: HTTP response bodies, pipes, archives embedded mid-stream in
//! some larger protocol.
//!
//! Because the central directory is never consulted, entries whose sizes
//! weren't known when their local file header was written (general-purpose
//! bit 3, "data descriptor follows") only get their CRC-32 and sizes once
//! their content has been fully read.
//!
//! ## Quick start
//!
//! ```no_run
//! use zip_stream_reader::ZipReader;
//!
//! # fn run(source: impl std::io::Read) -> zip_stream_reader::Result<()> {
//! let mut reader = ZipReader::new(source);
//! while let Some(entry) = reader.next_entry()? {
//!     let name = entry.name.clone();
//!     let mut data = reader.read_entry_data()?;
//!     let mut buf = Vec::new();
//!     data.read_to_end(&mut buf)?;
//!     println!("{}: {} bytes", name, buf.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod extra;
pub mod inflate;
pub mod le;
pub mod pushback;
pub mod reader;

pub use entry::ZipEntry;
pub use error::{Feature, Result, ZipReaderError};
pub use reader::{ReaderOptions, ZipEntryReader, ZipReader};
