//! A thin driver around `flate2`'s low-level `Decompress`, used instead of
//! `flate2::read::DeflateDecoder` because we need `total_in()`: the number
//! of compressed bytes actually consumed, which we reconcile against the
//! declared (or descriptor-supplied) compressed size once an entry finishes.

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{Result, ZipReaderError};

/// Drives a raw DEFLATE stream forward a chunk of input at a time, handing
/// back decompressed bytes as they become available.
pub struct Inflater {
    decompress: Decompress,
}

impl Inflater {
    pub fn new() -> Self {
        Self {
            decompress: Decompress::new(false),
        }
    }

    // Raw DEFLATE (ZIP method 8, no zlib wrapper) has no preset-dictionary
    // mechanism, and `flate2::Decompress` never reports one is needed here;
    // `Feature::Dictionary` exists for the error enum's completeness but this
    // driver has nothing that would construct it.

    /// Feed `input` to the inflator and fill as much of `output` as the
    /// stream currently has available. Returns `(bytes_consumed,
    /// bytes_produced, finished)`; `finished` is true once the stream's end
    /// marker has been seen, at which point any further input is unread by
    /// the caller rather than fed back in.
    pub fn inflate(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize, bool)> {
        let before_in = self.decompress.total_in();
        let before_out = self.decompress.total_out();
        let status = self
            .decompress
            .decompress(input, output, FlushDecompress::None)
            .map_err(|e| ZipReaderError::MalformedDeflate(e.to_string()))?;
        let consumed = (self.decompress.total_in() - before_in) as usize;
        let produced = (self.decompress.total_out() - before_out) as usize;
        let finished = matches!(status, Status::StreamEnd);
        if matches!(status, Status::Ok | Status::BufError) && consumed == 0 && produced == 0 && !input.is_empty() && !output.is_empty() {
            return Err(ZipReaderError::MalformedDeflate(
                "decompressor made no progress".to_string(),
            ));
        }
        Ok((consumed, produced, finished))
    }

    /// Total number of compressed bytes consumed across the stream's
    /// lifetime. Reconciled against the entry's declared or descriptor
    /// compressed size once the stream reports `StreamEnd`.
    pub fn total_in(&self) -> u64 {
        self.decompress.total_in()
    }

    pub fn total_out(&self) -> u64 {
        self.decompress.total_out()
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}
