//! Raw and decoded log lines.

/// One line as read from the file, newline included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Byte position of the first byte of the line.
    pub offset: u64,
    /// Line bytes, including the trailing `\n` when present.
    pub bytes: Vec<u8>,
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Byte position of the line start in the file.
    pub offset: u64,
    /// Decoded text with trailing whitespace trimmed.
    pub text: String,
}

impl LogLine {
    /// Decode a raw line. Invalid UTF-8 is replaced, never rejected.
    pub fn decode(raw: RawLine) -> Self {
        let text = match String::from_utf8(raw.bytes) {
            Ok(mut text) => {
                let trimmed = text.trim_end().len();
                text.truncate(trimmed);
                text
            }
            Err(err) => String::from_utf8_lossy(err.as_bytes()).trim_end().to_string(),
        };
        Self {
            offset: raw.offset,
            text,
        }
    }
}
