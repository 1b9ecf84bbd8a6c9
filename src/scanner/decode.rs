use std::borrow::Cow;

/// Text read from a file, tagged with whether it needed repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedText {
    /// The bytes were valid UTF-8.
    Clean(String),
    /// Invalid sequences were replaced with U+FFFD.
    Lossy(String),
}

impl DecodedText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clean(text) | Self::Lossy(text) => text,
        }
    }

    #[must_use]
    pub const fn is_lossy(&self) -> bool {
        matches!(self, Self::Lossy(_))
    }
}

/// Decode file bytes as UTF-8, falling back to a lossy repair.
#[must_use]
pub fn decode(bytes: Vec<u8>) -> DecodedText {
    match String::from_utf8(bytes) {
        Ok(text) => DecodedText::Clean(text),
        Err(err) => match String::from_utf8_lossy(err.as_bytes()) {
            Cow::Owned(text) => DecodedText::Lossy(text),
            Cow::Borrowed(text) => DecodedText::Lossy(text.to_string()),
        },
    }
}
