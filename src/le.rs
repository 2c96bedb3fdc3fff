//! Little-endian field decoders and the fixed 4-byte signatures ZIP uses to
//! tag its records.

/// Local file header signature: `50 4B 03 04`
pub const LFH_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
/// Central file header signature: `50 4B 01 02`
pub const CFH_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x01, 0x02];
/// End of central directory signature: `50 4B 05 06`
pub const EOCD_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];
/// Data descriptor signature: `50 4B 07 08`
pub const DD_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x07, 0x08];
/// Archive extra data signature: `50 4B 06 08`
pub const AED_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x06, 0x08];
/// Single-segment split-archive marker: `50 4B 30 30`
pub const SPLIT_MARKER: [u8; 4] = [0x50, 0x4B, 0x30, 0x30];

/// Sentinel value found in a 32-bit LFH/CFH size field when the real value
/// lives in the ZIP64 extra field instead.
pub const ZIP64_SENTINEL_32: u32 = 0xFFFF_FFFF;

/// Minimum size in bytes of an EOCD record (fixed fields only, no comment).
pub const MIN_EOCD_SIZE: usize = 22;
/// Size in bytes of a central file header's fixed fields.
pub const CFH_LEN: usize = 46;
/// Size in bytes of a local file header's fixed fields.
pub const LFH_LEN: usize = 30;

/// Header id of the ZIP64 extended information extra field.
pub const ZIP64_EXTRA_ID: u16 = 0x0001;
/// Header id of the InfoZIP Unicode Path extra field.
pub const UNICODE_PATH_EXTRA_ID: u16 = 0x7075;
/// Header id of the InfoZIP Unicode Comment extra field.
pub const UNICODE_COMMENT_EXTRA_ID: u16 = 0x6375;

#[inline]
pub fn u16_le(bytes: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([bytes[off], bytes[off + 1]])
}

#[inline]
pub fn u32_le(bytes: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([
        bytes[off],
        bytes[off + 1],
        bytes[off + 2],
        bytes[off + 3],
    ])
}

#[inline]
pub fn u64_le(bytes: &[u8], off: usize) -> u64 {
    u64::from_le_bytes([
        bytes[off],
        bytes[off + 1],
        bytes[off + 2],
        bytes[off + 3],
        bytes[off + 4],
        bytes[off + 5],
        bytes[off + 6],
        bytes[off + 7],
    ])
}

/// True if `bytes[off..off + 4]` equals `signature`.
#[inline]
pub fn matches_signature(bytes: &[u8], off: usize, signature: [u8; 4]) -> bool {
    bytes.len() >= off + 4 && bytes[off..off + 4] == signature
}

/// True if `bytes[..len]` is a prefix any caller-visible ZIP record may start with:
/// a local file header, an EOCD record, a data descriptor, or the split marker.
pub fn matches_any_record_prefix(bytes: &[u8], len: usize) -> bool {
    let check = &bytes[..len.min(bytes.len())];
    len >= 4
        && (matches_signature(check, 0, LFH_SIGNATURE)
            || matches_signature(check, 0, EOCD_SIGNATURE)
            || matches_signature(check, 0, DD_SIGNATURE)
            || matches_signature(check, 0, SPLIT_MARKER))
}
