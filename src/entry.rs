//! The entry metadata value object and the small bit-level helpers used to
//! derive its fields from a local file header's general-purpose flags.

use chrono::NaiveDateTime;
use codepage_437::{BorrowFromCp437, CP437_CONTROL};
use std::borrow::Cow;

/// General-purpose bit flag bit 0: entry content is encrypted.
const GPBF_ENCRYPTED: u16 = 1 << 0;
/// General-purpose bit flag bit 3: sizes/CRC follow in a trailing data descriptor.
const GPBF_DATA_DESCRIPTOR: u16 = 1 << 3;
/// General-purpose bit flag bit 11: name and comment are UTF-8 (the "language
/// encoding flag", EFS).
const GPBF_UTF8_NAMES: u16 = 1 << 11;

/// Metadata for one entry in the archive, parsed from its local file header
/// and (for data-descriptor or ZIP64 entries) back-filled once the payload
/// has been fully consumed.
#[derive(Debug, Clone)]
pub struct ZipEntry {
    /// Raw file name bytes as stored in the archive.
    pub name_bytes: Vec<u8>,
    /// File name decoded per the general-purpose UTF-8 flag, falling back to
    /// CP437 (and possibly overridden by an InfoZIP Unicode Path extra field).
    pub name: String,
    /// Upper byte of the local header's "version needed" field. Local
    /// headers don't carry a true "version made by" field; this is the
    /// closest analog the stream exposes.
    pub platform: u8,
    /// Raw general-purpose bit flag.
    pub flags: u16,
    /// Compression method code (0 = STORED, 8 = DEFLATED, others unsupported).
    pub method: u16,
    /// Raw DOS-format modification time/date, as packed in the header.
    pub dos_time_raw: u32,
    /// Decoded modification timestamp.
    pub modified: NaiveDateTime,
    /// Declared CRC-32. `None` until back-filled for data-descriptor entries.
    pub crc32: Option<u32>,
    /// Declared compressed size in bytes. `None` until back-filled.
    pub compressed_size: Option<u64>,
    /// Declared uncompressed size in bytes. `None` until back-filled.
    pub uncompressed_size: Option<u64>,
    /// Raw extra field bytes, as read from the local header.
    pub extra: Vec<u8>,
    /// True if a ZIP64 extended information extra field was present.
    pub uses_zip64: bool,
    /// True if general-purpose bit 3 was set: sizes/CRC arrive via a
    /// trailing data descriptor rather than the header.
    pub uses_data_descriptor: bool,
}

impl ZipEntry {
    pub(crate) fn is_utf8_named(flags: u16) -> bool {
        flags & GPBF_UTF8_NAMES != 0
    }

    pub(crate) fn has_data_descriptor(flags: u16) -> bool {
        flags & GPBF_DATA_DESCRIPTOR != 0
    }

    /// True if the general-purpose bit flag marks this entry's content as
    /// encrypted. The reader never attempts to decrypt; this exists so
    /// callers can detect and skip such entries via `can_read_entry_data`.
    pub fn is_encrypted(&self) -> bool {
        self.flags & GPBF_ENCRYPTED != 0
    }

    /// Decode `name_bytes` per the UTF-8 flag, falling back to CP437.
    pub(crate) fn decode_name(name_bytes: &[u8], flags: u16) -> String {
        if Self::is_utf8_named(flags) {
            String::from_utf8_lossy(name_bytes).into_owned()
        } else {
            let decoded: Cow<str> = Cow::borrow_from_cp437(name_bytes, &CP437_CONTROL);
            cow_to_string(decoded)
        }
    }
}

/// Decode a DOS-format time/date pair (as packed into a 32-bit LFH field,
/// time in the low 16 bits, date in the high 16 bits) into a timestamp.
pub fn dos_to_datetime(dos: u32) -> NaiveDateTime {
    let time = dos as u16;
    let date = (dos >> 16) as u16;

    let seconds = (time & 0b0001_1111) as u32 * 2; // 2-second resolution
    let minutes = (time >> 5 & 0b0011_1111) as u32;
    let hours = (time >> 11 & 0b0001_1111) as u32;

    let days = (date & 0b0001_1111) as u32;
    let months = (date >> 5 & 0b0000_1111) as u32;
    let years = (date >> 9 & 0b0111_1111) as i32 + 1980;

    chrono::NaiveDate::from_ymd_opt(years, months.max(1), days.max(1))
        .and_then(|d| d.and_hms_opt(hours.min(23), minutes.min(59), seconds.min(59)))
        .unwrap_or_else(|| {
            chrono::NaiveDate::from_ymd_opt(1980, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        })
}

/// Borrow-or-own helper used when a name needs to come back as owned text
/// regardless of which decode path produced it.
pub(crate) fn cow_to_string(s: Cow<'_, str>) -> String {
    s.into_owned()
}
