//! The forward-only streaming ZIP reader.
//!
//! `ZipReader` consumes a `Read` source exactly once, front to back. It never
//! seeks, never looks at the central directory, and never assumes the
//! underlying source's total length is known in advance. Each entry's local
//! file header is parsed as it is encountered; if that entry's sizes were
//! unknown at header time (general-purpose bit 3, "data descriptor
//! follows"), they are only available once its payload has been fully
//! drained and its trailing data descriptor located.

use std::io::Read;

use log::{debug, trace, warn};

use crate::entry::{dos_to_datetime, ZipEntry};
use crate::error::{Feature, Result, ZipReaderError};
use crate::extra::{find_unicode_name, find_zip64_sizes, has_zip64_extra};
use crate::inflate::Inflater;
use crate::le::{
    matches_any_record_prefix, matches_signature, u16_le, u32_le, u64_le, AED_SIGNATURE,
    CFH_SIGNATURE, DD_SIGNATURE, EOCD_SIGNATURE, LFH_SIGNATURE, SPLIT_MARKER, ZIP64_SENTINEL_32,
};
use crate::pushback::PushbackReader;

const METHOD_STORED: u16 = 0;
const METHOD_DEFLATED: u16 = 8;

/// Knobs that change how liberally the reader interprets the stream. The
/// defaults match ordinary, well-formed archives; callers who need the more
/// permissive behavior opt in explicitly rather than have it silently
/// enabled.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Prefer an InfoZIP Unicode Path extra field (`0x7075`) over the
    /// header's own name when both are present and the CRC check passes.
    pub use_unicode_extra_fields: bool,
    /// Allow a STORED entry (compression method 0) to also declare the
    /// data-descriptor flag. Conforming writers only do this for DEFLATED
    /// entries whose size isn't known up front; STORED entries always know
    /// their size, so a STORED+DD combination is unusual enough that it's
    /// rejected unless the caller asks for it.
    pub allow_stored_entries_with_data_descriptor: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            use_unicode_extra_fields: true,
            allow_stored_entries_with_data_descriptor: false,
        }
    }
}

/// One archive entry paired with a reader over its (already decompressed)
/// content. Dropping this without reading the content to completion leaves
/// the parent `ZipReader` positioned mid-entry; the next call to
/// `next_entry` drains whatever remains first.
pub struct ZipEntryReader<'a, R> {
    reader: &'a mut ZipReader<R>,
    entry_index: usize,
    method: u16,
    declared_compressed_size: Option<u64>,
    has_data_descriptor: bool,
    uses_zip64: bool,
    inflater: Option<Inflater>,
    crc: crc32fast::Hasher,
    compressed_consumed: u64,
    uncompressed_produced: u64,
    finished: bool,
    /// STORED content with an unbounded (data-descriptor-delimited) length
    /// has to be fully scanned for its trailing descriptor before any of it
    /// can be handed out, since the boundary isn't known until a following
    /// record signature is found; this holds the materialized content
    /// pending replay through `read()`.
    stored_cache: Option<Vec<u8>>,
    stored_cache_pos: usize,
}

impl<'a, R: Read> ZipEntryReader<'a, R> {
    /// Read the entry's remaining decompressed content into `out`, returning
    /// the number of bytes produced. `0` means the entry is exhausted; the
    /// CRC-32 and sizes on the owning `ZipEntry` are back-filled by this
    /// point (for both fixed-size and data-descriptor entries).
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        if self.finished || out.is_empty() {
            return Ok(0);
        }
        let n = match self.method {
            METHOD_STORED => self.read_stored(out)?,
            METHOD_DEFLATED => self.read_deflated(out)?,
            other => {
                return Err(ZipReaderError::Unsupported(
                    Feature::UnknownCompressionMethod(other),
                ))
            }
        };
        if n > 0 {
            self.crc.update(&out[..n]);
            self.uncompressed_produced += n as u64;
        } else {
            self.finish()?;
        }
        Ok(n)
    }

    /// Read the remainder of the entry's content into `out`, returning the
    /// number of bytes appended.
    pub fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<u64> {
        let mut buf = [0u8; 64 * 1024];
        let start = out.len() as u64;
        loop {
            let n = self.read(&mut buf)?;
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        Ok(out.len() as u64 - start)
    }

    /// Read and discard up to `n` bytes of decompressed content, returning
    /// how many were actually skipped (fewer than `n` at end of entry).
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        let mut buf = [0u8; 64 * 1024];
        let mut skipped = 0u64;
        while skipped < n {
            let want = (n - skipped).min(buf.len() as u64) as usize;
            let got = self.read(&mut buf[..want])?;
            if got == 0 {
                break;
            }
            skipped += got as u64;
        }
        Ok(skipped)
    }

    fn read_stored(&mut self, out: &mut [u8]) -> Result<usize> {
        if self.has_data_descriptor {
            self.read_stored_unbounded(out)
        } else {
            let remaining = self.declared_compressed_size.unwrap_or(0) - self.compressed_consumed;
            if remaining == 0 {
                return Ok(0);
            }
            let want = (out.len() as u64).min(remaining) as usize;
            let n = self.reader.source.read(&mut out[..want])?;
            if n == 0 {
                return Err(ZipReaderError::Truncated);
            }
            self.compressed_consumed += n as u64;
            Ok(n)
        }
    }

    /// STORED content whose length isn't known up front. The boundary
    /// between content and the trailing data descriptor can't be known
    /// until a following record signature is found, so the first call
    /// materializes the whole remainder into `stored_cache` via
    /// `materialize_stored_with_data_descriptor`, then every call (this one
    /// included) just replays out of that cache.
    fn read_stored_unbounded(&mut self, out: &mut [u8]) -> Result<usize> {
        if self.stored_cache.is_none() {
            let content = self.materialize_stored_with_data_descriptor()?;
            self.stored_cache = Some(content);
        }
        let cache = self.stored_cache.as_ref().expect("just populated above");
        let remaining = cache.len() - self.stored_cache_pos;
        if remaining == 0 {
            return Ok(0);
        }
        let take = remaining.min(out.len());
        out[..take].copy_from_slice(&cache[self.stored_cache_pos..self.stored_cache_pos + take]);
        self.stored_cache_pos += take;
        Ok(take)
    }

    /// Scan forward from the current position for the earliest local file
    /// header, central file header, or data descriptor signature, per the
    /// forward-only data-descriptor locator: everything before that point is
    /// the entry's genuine content, everything from it onward is pushed back
    /// for `locate_and_parse_data_descriptor`/`next_entry` to pick up.
    fn materialize_stored_with_data_descriptor(&mut self) -> Result<Vec<u8>> {
        let dd_len = if self.uses_zip64 { 20 } else { 12 };
        let retain = dd_len + 3;
        let mut window: Vec<u8> = Vec::new();
        let mut content: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 8 * 1024];

        loop {
            if let Some((idx, kind)) = find_next_record_signature(&window) {
                let boundary = match kind {
                    RecordKind::DataDescriptor => idx,
                    RecordKind::FileHeader => idx.saturating_sub(dd_len),
                };
                content.extend_from_slice(&window[..boundary]);
                self.reader.source.unread(&window[boundary..]);
                self.compressed_consumed += boundary as u64;
                return Ok(content);
            }

            if window.len() > retain {
                let flush = window.len() - retain;
                content.extend_from_slice(&window[..flush]);
                self.compressed_consumed += flush as u64;
                window.drain(..flush);
            }

            let got = self.reader.source.read(&mut chunk)?;
            if got == 0 {
                return Err(ZipReaderError::Truncated);
            }
            window.extend_from_slice(&chunk[..got]);
        }
    }

    fn read_deflated(&mut self, out: &mut [u8]) -> Result<usize> {
        let inflater = self.inflater.get_or_insert_with(Inflater::new);
        loop {
            let mut chunk = [0u8; 8 * 1024];
            let chunk_len = self.reader.source.read(&mut chunk)?;
            if chunk_len == 0 && !self.has_data_descriptor {
                return Err(ZipReaderError::Truncated);
            }
            let (consumed, made, stream_end) = inflater.inflate(&chunk[..chunk_len], out)?;
            if consumed < chunk_len {
                self.reader.source.unread(&chunk[consumed..chunk_len]);
            }
            self.compressed_consumed = inflater.total_in();
            if stream_end || made > 0 || chunk_len == 0 {
                return Ok(made);
            }
        }
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let computed_crc = self.crc.clone().finalize();

        if self.has_data_descriptor {
            let dd = locate_and_parse_data_descriptor(&mut self.reader.source)?;
            let entry = &mut self.reader.pending_entries[self.entry_index];
            entry.crc32 = Some(dd.crc32);
            entry.compressed_size = Some(dd.compressed_size);
            entry.uncompressed_size = Some(dd.uncompressed_size);

            if dd.crc32 != computed_crc || dd.uncompressed_size != self.uncompressed_produced {
                warn!(
                    "data descriptor mismatch on {:?}: crc {:08x} vs computed {:08x}",
                    entry.name, dd.crc32, computed_crc
                );
                return Err(ZipReaderError::Truncated);
            }
        } else {
            let entry = &self.reader.pending_entries[self.entry_index];
            if let Some(declared) = entry.crc32 {
                if declared != computed_crc {
                    warn!(
                        "CRC mismatch on {:?}: header says {:08x}, computed {:08x}",
                        entry.name, declared, computed_crc
                    );
                    return Err(ZipReaderError::Truncated);
                }
            }
        }
        self.reader.entry_open = false;
        Ok(())
    }
}

struct DataDescriptor {
    crc32: u32,
    compressed_size: u64,
    uncompressed_size: u64,
}

/// Which kind of record a signature found mid-scan belongs to.
enum RecordKind {
    DataDescriptor,
    FileHeader,
}

/// Earliest position in `buf` where a local file header, central file
/// header, or data descriptor signature begins, and which kind it is.
/// Scans every candidate offset for all three signatures so the earliest
/// match wins regardless of which pattern it is.
fn find_next_record_signature(buf: &[u8]) -> Option<(usize, RecordKind)> {
    if buf.len() < 4 {
        return None;
    }
    for i in 0..=(buf.len() - 4) {
        if matches_signature(buf, i, DD_SIGNATURE) {
            return Some((i, RecordKind::DataDescriptor));
        }
        if matches_signature(buf, i, LFH_SIGNATURE) || matches_signature(buf, i, CFH_SIGNATURE) {
            return Some((i, RecordKind::FileHeader));
        }
    }
    None
}

/// Parse the data descriptor immediately following an entry's payload. Per
/// APPNOTE, the leading 4-byte signature is "recommended but optional," so
/// it's consumed only if present. The size fields are themselves ambiguous:
/// some writers emit 8-byte ZIP64 sizes without a `0x0001` extra to signal
/// it. Resolve it by reading 4 bytes of CRC followed by a 16-byte window and
/// inspecting bytes 8..12 of that window: if they open a local or central
/// file header, the window's first 8 bytes are two 4-byte size fields and
/// the trailing 8 bytes belong to the next record and are pushed back;
/// otherwise the full 16 bytes are two 8-byte size fields.
fn locate_and_parse_data_descriptor<R: Read>(
    source: &mut PushbackReader<R>,
) -> Result<DataDescriptor> {
    let mut head = [0u8; 4];
    let n = peek_up_to(source, &mut head)?;
    if n < 4 {
        return Err(ZipReaderError::Truncated);
    }
    if matches_signature(&head, 0, DD_SIGNATURE) {
        read_exact_unseekable(source, &mut head)?;
    } else {
        trace!("data descriptor without leading signature");
    }

    let mut crc_buf = [0u8; 4];
    read_exact_unseekable(source, &mut crc_buf)?;
    let crc32 = u32_le(&crc_buf, 0);

    let mut window = [0u8; 16];
    read_exact_unseekable(source, &mut window)?;

    if matches_signature(&window, 8, LFH_SIGNATURE) || matches_signature(&window, 8, CFH_SIGNATURE)
    {
        let compressed_size = u32_le(&window, 0) as u64;
        let uncompressed_size = u32_le(&window, 4) as u64;
        source.unread(&window[8..]);
        Ok(DataDescriptor {
            crc32,
            compressed_size,
            uncompressed_size,
        })
    } else {
        let compressed_size = u64_le(&window, 0);
        let uncompressed_size = u64_le(&window, 8);
        Ok(DataDescriptor {
            crc32,
            compressed_size,
            uncompressed_size,
        })
    }
}

/// Fill `buf` as far as the source allows without blocking past EOF, then
/// push everything read back so the caller sees an unconsumed peek.
fn peek_up_to<R: Read>(source: &mut PushbackReader<R>, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    if filled > 0 {
        source.unread(&buf[..filled]);
    }
    Ok(filled)
}

fn read_exact_unseekable<R: Read>(source: &mut PushbackReader<R>, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(ZipReaderError::UnexpectedEof);
        }
        filled += n;
    }
    Ok(())
}

/// What the trailer walker found after the last entry.
enum AfterTrailer {
    /// End of central directory reached; the archive is exhausted.
    Eocd,
}

/// A forward-only reader over a ZIP archive byte stream.
///
/// Construct with [`ZipReader::new`], then repeatedly call
/// [`ZipReader::next_entry`] until it returns `None`. Call
/// [`ZipReader::read_entry_data`] to stream the current entry's content
/// before advancing; advancing past an unread entry drains it first.
pub struct ZipReader<R> {
    source: PushbackReader<R>,
    options: ReaderOptions,
    pending_entries: Vec<ZipEntry>,
    entry_open: bool,
    done: bool,
    closed: bool,
}

impl<R: Read> ZipReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        Self {
            source: PushbackReader::new(source),
            options,
            pending_entries: Vec::new(),
            entry_open: false,
            done: false,
            closed: false,
        }
    }

    /// True if the prefix `bytes[..len]` opens a record this reader can
    /// recognize at the top level: a local file header, an end of central
    /// directory record, a data descriptor, or the single-segment split
    /// marker.
    pub fn matches(bytes: &[u8], len: usize) -> bool {
        matches_any_record_prefix(bytes, len)
    }

    /// True iff `entry`'s content can be handed to [`Self::read_entry_data`]:
    /// its compression method is STORED or DEFLATED, it is not encrypted,
    /// and it either has no data descriptor, is DEFLATED (whose boundary
    /// the inflator itself detects), or the reader was configured with
    /// `allow_stored_entries_with_data_descriptor`.
    pub fn can_read_entry_data(&self, entry: &ZipEntry) -> bool {
        if entry.is_encrypted() {
            return false;
        }
        if entry.method != METHOD_STORED && entry.method != METHOD_DEFLATED {
            return false;
        }
        !entry.uses_data_descriptor
            || entry.method == METHOD_DEFLATED
            || self.options.allow_stored_entries_with_data_descriptor
    }

    /// Release the underlying resources and mark this reader closed. Any
    /// entry being streamed is abandoned without being drained; every
    /// subsequent call other than another `close()` fails with
    /// [`ZipReaderError::Closed`].
    pub fn close(&mut self) {
        self.closed = true;
        self.entry_open = false;
        self.done = true;
    }

    /// Advance to the next entry, draining whatever remains of the current
    /// one first. Returns `None` once the end of central directory is
    /// reached, or the stream runs out before one is found.
    pub fn next_entry(&mut self) -> Result<Option<&ZipEntry>> {
        if self.closed {
            return Err(ZipReaderError::Closed);
        }
        if self.done {
            return Ok(None);
        }
        if self.entry_open {
            self.drain_current_entry()?;
        }

        loop {
            let mut signature = [0u8; 4];
            let n = peek_up_to(&mut self.source, &mut signature)?;
            if n < 4 {
                warn!("stream ended before an end of central directory record was seen");
                self.done = true;
                return Ok(None);
            }

            if self.pending_entries.is_empty() && matches_signature(&signature, 0, DD_SIGNATURE) {
                // A data descriptor signature as the very first bytes of the
                // stream is how a genuine multi-segment split archive marks
                // its second-and-later volumes; only the cosmetic
                // single-segment marker below is tolerated.
                return Err(ZipReaderError::Unsupported(Feature::Splitting));
            }
            if matches_signature(&signature, 0, LFH_SIGNATURE) {
                read_exact_unseekable(&mut self.source, &mut signature)?;
                let entry = self.parse_local_file_header()?;
                self.pending_entries.push(entry);
                self.entry_open = true;
                let idx = self.pending_entries.len() - 1;
                return Ok(Some(&self.pending_entries[idx]));
            }
            if matches_signature(&signature, 0, SPLIT_MARKER) {
                debug!("single-segment split marker, skipping");
                read_exact_unseekable(&mut self.source, &mut signature)?;
                continue;
            }
            if matches_signature(&signature, 0, AED_SIGNATURE) {
                debug!("archive extra data record, skipping");
                read_exact_unseekable(&mut self.source, &mut signature)?;
                self.skip_archive_extra_data()?;
                continue;
            }
            if matches_signature(&signature, 0, CFH_SIGNATURE) {
                read_exact_unseekable(&mut self.source, &mut signature)?;
                match self.walk_trailer()? {
                    AfterTrailer::Eocd => {
                        self.done = true;
                        return Ok(None);
                    }
                }
            }
            if matches_signature(&signature, 0, EOCD_SIGNATURE) {
                read_exact_unseekable(&mut self.source, &mut signature)?;
                self.consume_eocd()?;
                self.done = true;
                return Ok(None);
            }
            return Err(ZipReaderError::Truncated);
        }
    }

    /// Begin streaming the current entry's decompressed content.
    /// `next_entry` must have returned `Some` most recently, and the entry
    /// must not already be exhausted.
    pub fn read_entry_data(&mut self) -> Result<ZipEntryReader<'_, R>> {
        if self.closed {
            return Err(ZipReaderError::Closed);
        }
        if !self.entry_open {
            return Err(ZipReaderError::InvalidArgument(
                "no entry is currently open".to_string(),
            ));
        }
        let idx = self.pending_entries.len() - 1;
        let entry = &self.pending_entries[idx];
        if entry.is_encrypted() {
            return Err(ZipReaderError::Unsupported(Feature::EncryptedContent));
        }
        if entry.method != METHOD_STORED && entry.method != METHOD_DEFLATED {
            return Err(ZipReaderError::Unsupported(
                Feature::UnknownCompressionMethod(entry.method),
            ));
        }
        if entry.method == METHOD_STORED
            && entry.uses_data_descriptor
            && !self.options.allow_stored_entries_with_data_descriptor
        {
            return Err(ZipReaderError::Unsupported(Feature::DataDescriptor));
        }
        let uses_zip64 = entry.uses_zip64;
        Ok(ZipEntryReader {
            declared_compressed_size: entry.compressed_size,
            has_data_descriptor: entry.uses_data_descriptor,
            method: entry.method,
            uses_zip64,
            reader: self,
            entry_index: idx,
            inflater: None,
            crc: crc32fast::Hasher::new(),
            compressed_consumed: 0,
            uncompressed_produced: 0,
            finished: false,
            stored_cache: None,
            stored_cache_pos: 0,
        })
    }

    /// All entries encountered so far, most recent last. An entry's size and
    /// CRC fields remain `None` until its content has been fully read if it
    /// used a data descriptor.
    pub fn entries_so_far(&self) -> &[ZipEntry] {
        &self.pending_entries
    }

    fn drain_current_entry(&mut self) -> Result<()> {
        let mut reader = self.read_entry_data()?;
        let mut sink = [0u8; 64 * 1024];
        loop {
            if reader.read(&mut sink)? == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Parse a local file header, signature already consumed, leaving the
    /// stream positioned at the start of the entry's payload.
    fn parse_local_file_header(&mut self) -> Result<ZipEntry> {
        let mut fixed = [0u8; 26];
        read_exact_unseekable(&mut self.source, &mut fixed)?;

        let version_needed = u16_le(&fixed, 0);
        let flags = u16_le(&fixed, 2);
        let method = u16_le(&fixed, 4);
        let dos_time_raw = u32_le(&fixed, 6);
        let mut crc32 = u32_le(&fixed, 10);
        let mut compressed_size = u32_le(&fixed, 14) as u64;
        let mut uncompressed_size = u32_le(&fixed, 18) as u64;
        let name_len = u16_le(&fixed, 22) as usize;
        let extra_len = u16_le(&fixed, 24) as usize;

        let mut name_bytes = vec![0u8; name_len];
        read_exact_unseekable(&mut self.source, &mut name_bytes)?;
        let mut extra = vec![0u8; extra_len];
        read_exact_unseekable(&mut self.source, &mut extra)?;

        let has_dd = ZipEntry::has_data_descriptor(flags);

        // Each fixed-size field is checked against the sentinel on its own:
        // a highly compressible multi-gigabyte file can overflow only the
        // uncompressed field while the compressed field stays well under 4
        // GiB, so the two must not be coupled together.
        let compressed_is_sentinel = compressed_size as u32 == ZIP64_SENTINEL_32;
        let uncompressed_is_sentinel = uncompressed_size as u32 == ZIP64_SENTINEL_32;
        let uses_zip64 = has_zip64_extra(&extra);
        if let Some(sizes) =
            find_zip64_sizes(&extra, uncompressed_is_sentinel, compressed_is_sentinel)
        {
            if let Some(v) = sizes.uncompressed_size {
                uncompressed_size = v;
            }
            if let Some(v) = sizes.compressed_size {
                compressed_size = v;
            }
        }

        if has_dd {
            // Sizes and CRC are unreliable (commonly zero) until the trailing
            // descriptor is read.
            crc32 = 0;
            compressed_size = 0;
            uncompressed_size = 0;
        }

        let mut name = ZipEntry::decode_name(&name_bytes, flags);
        if self.options.use_unicode_extra_fields {
            if let Some(unicode_name) = find_unicode_name(&extra, &name_bytes) {
                name = unicode_name;
            }
        }

        trace!("local file header: {} (method {})", name, method);

        Ok(ZipEntry {
            name_bytes,
            name,
            platform: (version_needed >> 8) as u8,
            flags,
            method,
            dos_time_raw,
            modified: dos_to_datetime(dos_time_raw),
            crc32: if has_dd { None } else { Some(crc32) },
            compressed_size: if has_dd { None } else { Some(compressed_size) },
            uncompressed_size: if has_dd { None } else { Some(uncompressed_size) },
            extra,
            uses_zip64,
            uses_data_descriptor: has_dd,
        })
    }

    /// A central file header was seen where we expected either another local
    /// file header or the end of central directory: walk the remaining
    /// central directory without attempting to use it, since every entry it
    /// describes has already been streamed.
    fn walk_trailer(&mut self) -> Result<AfterTrailer> {
        self.skip_central_file_header()?;
        loop {
            let mut signature = [0u8; 4];
            let n = peek_up_to(&mut self.source, &mut signature)?;
            if n < 4 {
                return Err(ZipReaderError::Truncated);
            }
            if matches_signature(&signature, 0, CFH_SIGNATURE) {
                read_exact_unseekable(&mut self.source, &mut signature)?;
                self.skip_central_file_header()?;
                continue;
            }
            if matches_signature(&signature, 0, EOCD_SIGNATURE) {
                read_exact_unseekable(&mut self.source, &mut signature)?;
                self.consume_eocd()?;
                return Ok(AfterTrailer::Eocd);
            }
            return Err(ZipReaderError::Truncated);
        }
    }

    /// Skip an archive extra data record (signature already read): a
    /// 4-byte length followed by that many bytes of data nobody in this
    /// reader's scope has a use for. Per APPNOTE it precedes the first
    /// central file header when present, which is why `next_entry`'s
    /// dispatch handles it before falling through to `walk_trailer`.
    fn skip_archive_extra_data(&mut self) -> Result<()> {
        let mut len_buf = [0u8; 4];
        read_exact_unseekable(&mut self.source, &mut len_buf)?;
        let len = u32_le(&len_buf, 0) as usize;
        let mut data = vec![0u8; len];
        read_exact_unseekable(&mut self.source, &mut data)?;
        Ok(())
    }

    fn skip_central_file_header(&mut self) -> Result<()> {
        let mut fixed = [0u8; 42];
        read_exact_unseekable(&mut self.source, &mut fixed)?;
        let name_len = u16_le(&fixed, 24) as usize;
        let extra_len = u16_le(&fixed, 26) as usize;
        let comment_len = u16_le(&fixed, 28) as usize;
        let mut rest = vec![0u8; name_len + extra_len + comment_len];
        read_exact_unseekable(&mut self.source, &mut rest)?;
        Ok(())
    }

    /// Consume an end of central directory record (signature already read),
    /// including its variable-length comment. The ZIP64 EOCD locator and
    /// record, which live before the (regular) EOCD and after the last
    /// central file header, are never visited by a forward-only walk — by
    /// the time we reach them we have already streamed every entry they
    /// would have described, including any whose true sizes needed ZIP64's
    /// wider fields, which came from each entry's own local extra field
    /// instead.
    fn consume_eocd(&mut self) -> Result<()> {
        let mut fixed = [0u8; 18];
        read_exact_unseekable(&mut self.source, &mut fixed)?;
        let comment_len = u16_le(&fixed, 16) as usize;
        let mut comment = vec![0u8; comment_len];
        read_exact_unseekable(&mut self.source, &mut comment)?;
        Ok(())
    }
}
