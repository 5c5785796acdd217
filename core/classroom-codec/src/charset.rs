//! Byte decoding with a Thai-legacy-aware fallback chain.
//!
//! The classroom API labels its charset inconsistently: sometimes `utf-8`,
//! sometimes `tis-620` or `windows-874`, sometimes nothing at all. Decoding
//! therefore never fails. A declared charset the decoder knows always wins,
//! even where a lossy UTF-8 decode would also succeed; otherwise the first
//! resolvable entry of a fixed fallback chain is used.
//!
//! Three families are supported:
//! - Thai legacy (TIS-620, Windows-874, ISO-8859-11) through a fixed table
//! - the `latin1` fallback, byte for byte
//! - every other WHATWG encoding label through `encoding_rs`, in replacement
//!   mode

use encoding_rs::{Encoding, REPLACEMENT};
use std::sync::OnceLock;
use tracing::debug;

/// Labels decoded through the Thai table. The three encodings agree on
/// 0xA0–0xFB, which is all the classroom API ever sends.
const THAI_LEGACY_LABELS: &[&str] = &[
    "tis-620",
    "tis620",
    "windows-874",
    "windows874",
    "iso-8859-11",
    "iso8859-11",
    "cp874",
    "dos-874",
    "x-windows-874",
];

/// The last fallback candidate. Other Latin-1 aliases (`iso-8859-1`, `l1`)
/// resolve to windows-1252 like any WHATWG label.
const LATIN1_LABEL: &str = "latin1";

/// Candidates tried after the caller's hint, in order.
const FALLBACK_ORDER: &[&str] = &[
    "utf-8",
    "utf8",
    "windows-874",
    "windows874",
    "tis-620",
    "tis620",
    "iso-8859-11",
    LATIN1_LABEL,
];

/// A character set the decoder knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// TIS-620 / Windows-874 / ISO-8859-11.
    ThaiLegacy,
    /// ISO-8859-1, one byte per codepoint.
    Latin1,
    /// Any other encoding with a WHATWG label.
    Standard(&'static Encoding),
}

impl Charset {
    /// Resolves a charset label (case-insensitive). Unknown labels, and
    /// labels the WHATWG standard maps to the replacement encoding, yield
    /// `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        if THAI_LEGACY_LABELS.contains(&label.as_str()) {
            return Some(Self::ThaiLegacy);
        }
        if label == LATIN1_LABEL {
            return Some(Self::Latin1);
        }
        Encoding::for_label(label.as_bytes())
            .filter(|encoding| *encoding != REPLACEMENT)
            .map(Self::Standard)
    }

    /// Decodes `bytes`. Total: malformed input is replaced, never rejected.
    /// A byte order mark matching the encoding is stripped.
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::ThaiLegacy => decode_thai_legacy(bytes),
            Self::Latin1 => bytes.iter().copied().map(char::from).collect(),
            Self::Standard(encoding) => encoding.decode_with_bom_removal(bytes).0.into_owned(),
        }
    }
}

/// Decodes `bytes`, honoring `charset_hint` first and falling back through
/// UTF-8, Windows-874, TIS-620, ISO-8859-11 and Latin-1.
///
/// A declared non-UTF-8 charset wins even though a lossy UTF-8 decode would
/// also "succeed"; the hint is only skipped when it names a charset the
/// decoder does not support.
///
/// # Example
///
/// ```
/// use classroom_codec::decode;
///
/// assert_eq!(decode("สวัสดี".as_bytes(), None), "สวัสดี");
/// assert_eq!(decode(&[0xCA, 0xC7, 0xD1, 0xCA, 0xB4, 0xD5], Some("TIS-620")), "สวัสดี");
/// ```
#[must_use]
pub fn decode(bytes: &[u8], charset_hint: Option<&str>) -> String {
    if let Some(label) = normalized_hint(charset_hint) {
        match Charset::from_label(&label) {
            Some(charset) => {
                debug!(charset = %label, ?charset, "decoding payload with declared charset");
                return charset.decode(bytes);
            }
            None => debug!(charset = %label, "unsupported charset, trying fallbacks"),
        }
    }

    if let Some((label, charset)) = fallback_charsets().first() {
        debug!(charset = %label, ?charset, "decoding payload with fallback charset");
        return charset.decode(bytes);
    }

    debug!("no charset candidate matched, using Thai legacy fallback");
    let thai = decode_thai_legacy(bytes);
    if !thai.trim().is_empty() {
        return thai;
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn normalized_hint(charset_hint: Option<&str>) -> Option<String> {
    charset_hint
        .map(|h| h.trim().to_ascii_lowercase())
        .filter(|h| !h.is_empty())
}

/// The fallback candidates that resolve, in order. Resolved once per process
/// and shared read-only afterwards.
fn fallback_charsets() -> &'static [(&'static str, Charset)] {
    static CHAIN: OnceLock<Vec<(&'static str, Charset)>> = OnceLock::new();
    CHAIN.get_or_init(|| {
        FALLBACK_ORDER
            .iter()
            .filter_map(|label| Charset::from_label(label).map(|charset| (*label, charset)))
            .collect()
    })
}

/// Decodes bytes through the fixed Thai table.
///
/// - 0x00–0x7F: ASCII
/// - 0xA0: U+00A0 (no-break space)
/// - 0xA1–0xDA: U+0E01 onward (consonants and vowels)
/// - 0xDF–0xFB: U+0E3F onward (baht sign, vowels, tone marks, digits)
/// - anything else: the byte value as a codepoint
#[must_use]
pub fn decode_thai_legacy(bytes: &[u8]) -> String {
    bytes.iter().copied().map(thai_legacy_char).collect()
}

fn thai_legacy_char(byte: u8) -> char {
    let code = match byte {
        0x00..=0x7F => u32::from(byte),
        0xA0 => 0x00A0,
        0xA1..=0xDA => 0x0E01 + u32::from(byte - 0xA1),
        0xDF..=0xFB => 0x0E3F + u32::from(byte - 0xDF),
        _ => u32::from(byte),
    };
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}
