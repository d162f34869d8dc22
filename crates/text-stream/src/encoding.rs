//! crates/text-stream/src/encoding.rs
//!
//! Text-to-bytes conversion for the line buffer.
//!
//! [`TextEncoding`] resolves a WHATWG label through `encoding_rs` and
//! [`ErrorPolicy`] decides what happens to characters the encoding cannot
//! represent. UTF-8 output borrows the input unchanged; other encodings go
//! through an `encoding_rs` encoder, with substitutions fed back through the
//! same encoder so stateful encodings stay consistent.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoder, EncoderResult, Encoding, UTF_8};

use crate::error::{StreamError, StreamResult};

/// Byte sequence that terminates a line in every supported output encoding.
pub const NEWLINE: &[u8] = b"\n";

/// Output encoding of a [`TextLogStream`](crate::TextLogStream).
///
/// Labels follow the WHATWG Encoding Standard, so `"latin1"` and `"ascii"`
/// resolve to `windows-1252`. Encodings without a byte-oriented encoder
/// (UTF-16) resolve to UTF-8, matching `encoding_rs`'s output encoding rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
}

impl TextEncoding {
    /// Returns the default UTF-8 encoding.
    #[must_use]
    pub fn utf8() -> Self {
        Self { encoding: UTF_8 }
    }

    /// Resolves an encoding label.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnknownEncoding`] when `label` is not a known
    /// WHATWG label.
    ///
    /// # Examples
    ///
    /// ```
    /// use text_stream::TextEncoding;
    ///
    /// assert_eq!(TextEncoding::for_label("utf8")?.name(), "UTF-8");
    /// assert_eq!(TextEncoding::for_label("latin1")?.name(), "windows-1252");
    /// assert!(TextEncoding::for_label("klingon").is_err());
    /// # Ok::<(), text_stream::StreamError>(())
    /// ```
    pub fn for_label(label: &str) -> StreamResult<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self {
                encoding: encoding.output_encoding(),
            })
            .ok_or_else(|| StreamError::UnknownEncoding(label.to_owned()))
    }

    /// Returns the canonical name of the encoding.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Reports whether this is UTF-8, where encoding never fails.
    #[must_use]
    pub fn is_utf8(&self) -> bool {
        self.encoding == UTF_8
    }

    /// Encodes `text`, applying `policy` to unmappable characters.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Unencodable`] for the first unmappable
    /// character when `policy` is [`ErrorPolicy::Strict`].
    pub fn encode<'a>(&self, text: &'a str, policy: ErrorPolicy) -> StreamResult<Cow<'a, [u8]>> {
        if self.is_utf8() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }

        let mut encoder = self.encoding.new_encoder();
        let mut out = Vec::with_capacity(text.len());
        let mut rest = text;
        loop {
            let (unmappable, remaining) = encode_step(&mut encoder, rest, &mut out, true);
            rest = remaining;
            let Some(character) = unmappable else {
                return Ok(Cow::Owned(out));
            };
            let Some(substitute) = policy.substitute(character) else {
                return Err(StreamError::Unencodable {
                    encoding: self.name(),
                    character,
                });
            };
            encode_step(&mut encoder, &substitute, &mut out, false);
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = StreamError;

    fn from_str(label: &str) -> StreamResult<Self> {
        Self::for_label(label)
    }
}

/// Runs the encoder until `src` is consumed or an unmappable character stops
/// it, growing `dst` as needed. Returns that character and the unread input.
fn encode_step<'s>(
    encoder: &mut Encoder,
    src: &'s str,
    dst: &mut Vec<u8>,
    last: bool,
) -> (Option<char>, &'s str) {
    let mut rest = src;
    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(rest.len())
            .unwrap_or_else(|| rest.len().saturating_mul(4).saturating_add(16));
        dst.reserve(needed);
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(rest, dst, last);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => return (None, rest),
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(character) => return (Some(character), rest),
        }
    }
}

/// Handling of characters the output encoding cannot represent.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorPolicy {
    /// Fail the write.
    #[default]
    Strict,
    /// Substitute `?`.
    Replace,
    /// Drop the character.
    Ignore,
    /// Substitute a `\xNN`, `\uNNNN` or `\UNNNNNNNN` escape.
    BackslashReplace,
    /// Substitute an XML character reference such as `&#20013;`.
    XmlCharRefReplace,
}

impl ErrorPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Strict,
        Self::Replace,
        Self::Ignore,
        Self::BackslashReplace,
        Self::XmlCharRefReplace,
    ];

    /// Returns the policy's name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Replace => "replace",
            Self::Ignore => "ignore",
            Self::BackslashReplace => "backslashreplace",
            Self::XmlCharRefReplace => "xmlcharrefreplace",
        }
    }

    /// Returns the text written in place of `character`, or `None` when the
    /// write must fail.
    ///
    /// ```
    /// use text_stream::ErrorPolicy;
    ///
    /// assert_eq!(ErrorPolicy::BackslashReplace.substitute('\u{e9}').as_deref(), Some("\\xe9"));
    /// assert_eq!(ErrorPolicy::XmlCharRefReplace.substitute('\u{4e2d}').as_deref(), Some("&#20013;"));
    /// assert_eq!(ErrorPolicy::Strict.substitute('\u{e9}'), None);
    /// ```
    #[must_use]
    pub fn substitute(self, character: char) -> Option<Cow<'static, str>> {
        let code = u32::from(character);
        match self {
            Self::Strict => None,
            Self::Replace => Some(Cow::Borrowed("?")),
            Self::Ignore => Some(Cow::Borrowed("")),
            Self::BackslashReplace => Some(Cow::Owned(match code {
                0..=0xff => format!("\\x{code:02x}"),
                0x100..=0xffff => format!("\\u{code:04x}"),
                _ => format!("\\U{code:08x}"),
            })),
            Self::XmlCharRefReplace => Some(Cow::Owned(format!("&#{code};"))),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ErrorPolicy`] name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown error policy: {0}")]
pub struct ParseErrorPolicyError(String);

impl FromStr for ErrorPolicy {
    type Err = ParseErrorPolicyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == normalized)
            .ok_or_else(|| ParseErrorPolicyError(name.to_owned()))
    }
}
