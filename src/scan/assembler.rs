//! Line reassembly for chunks read back to front.
//!
//! Chunks arrive in reverse file order. The bytes of a chunk up to and
//! including its first newline belong to a line whose start has not been
//! read yet, so they are carried onto the next (earlier) chunk. Everything
//! after that newline is made of complete lines.

use super::line::RawLine;

/// Reassembles complete lines from chunks fed in reverse order.
#[derive(Debug)]
pub struct LineAssembler {
    /// Head fragment whose line start is still unknown.
    carry: Vec<u8>,
    /// File offset of `carry[0]`; equals the start of the last chunk fed.
    carry_start: u64,
}

impl LineAssembler {
    /// Start assembling backward from `end` (exclusive).
    pub fn new(end: u64) -> Self {
        Self {
            carry: Vec::new(),
            carry_start: end,
        }
    }

    /// Feed the chunk that immediately precedes everything fed so far.
    ///
    /// Returns the lines completed by this chunk, in file order. A chunk
    /// without any newline is carried whole and yields nothing.
    pub fn push_chunk(&mut self, position: u64, mut chunk: Vec<u8>) -> Vec<RawLine> {
        debug_assert_eq!(position + chunk.len() as u64, self.carry_start);

        let Some(first_newline) = chunk.iter().position(|&b| b == b'\n') else {
            chunk.append(&mut self.carry);
            self.carry = chunk;
            self.carry_start = position;
            return Vec::new();
        };

        let mut lines = Vec::new();
        let mut line_start = first_newline + 1;
        while let Some(len) = chunk[line_start..].iter().position(|&b| b == b'\n') {
            let line_end = line_start + len + 1;
            lines.push(RawLine {
                offset: position + line_start as u64,
                bytes: chunk[line_start..line_end].to_vec(),
            });
            line_start = line_end;
        }

        // The chunk's tail and the old head are two halves of one line.
        let mut spanning = chunk[line_start..].to_vec();
        spanning.append(&mut self.carry);
        if !spanning.is_empty() {
            lines.push(RawLine {
                offset: position + line_start as u64,
                bytes: spanning,
            });
        }

        chunk.truncate(first_newline + 1);
        self.carry = chunk;
        self.carry_start = position;
        lines
    }

    /// Release the carried head as the file's first line.
    ///
    /// Only valid once the chunk at position 0 has been fed.
    pub fn finish(&mut self) -> Option<RawLine> {
        debug_assert_eq!(self.carry_start, 0);
        if self.carry.is_empty() {
            return None;
        }
        Some(RawLine {
            offset: self.carry_start,
            bytes: std::mem::take(&mut self.carry),
        })
    }

    /// Offset of the oldest line emitted so far.
    ///
    /// Every complete line at or after the frontier has been handed out.
    pub fn frontier(&self) -> u64 {
        self.carry_start + self.carry.len() as u64
    }

    /// Bytes currently carried for the next chunk.
    pub fn carried(&self) -> usize {
        self.carry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `data` to an assembler in `chunk_size` pieces from the end.
    fn assemble(data: &[u8], chunk_size: usize) -> Vec<RawLine> {
        let mut assembler = LineAssembler::new(data.len() as u64);
        let mut batches = Vec::new();
        let mut end = data.len();
        while end > 0 {
            let start = end.saturating_sub(chunk_size);
            let mut batch = assembler.push_chunk(start as u64, data[start..end].to_vec());
            if start == 0 {
                if let Some(first) = assembler.finish() {
                    batch.insert(0, first);
                }
            }
            batches.push(batch);
            end = start;
        }
        batches.into_iter().rev().flatten().collect()
    }

    fn texts(lines: &[RawLine]) -> Vec<&[u8]> {
        lines.iter().map(|l| l.bytes.as_slice()).collect()
    }

    #[test]
    fn test_single_chunk() {
        let lines = assemble(b"a\nbb\nccc\n", 64);
        assert_eq!(texts(&lines), vec![&b"a\n"[..], b"bb\n", b"ccc\n"]);
        assert_eq!(lines[0].offset, 0);
        assert_eq!(lines[1].offset, 2);
        assert_eq!(lines[2].offset, 5);
    }

    #[test]
    fn test_every_chunk_size_gives_same_lines() {
        let data = b"first line\nsecond\n\nfourth line is longer\nlast";
        let expected = assemble(data, data.len());
        for chunk_size in 1..data.len() {
            assert_eq!(assemble(data, chunk_size), expected, "chunk_size {}", chunk_size);
        }
        assert_eq!(expected.len(), 5);
        assert_eq!(expected[2].bytes, b"\n");
        assert_eq!(expected[4].bytes, b"last");
    }

    #[test]
    fn test_no_trailing_newline() {
        let lines = assemble(b"one\ntwo", 3);
        assert_eq!(texts(&lines), vec![&b"one\n"[..], b"two"]);
    }

    #[test]
    fn test_single_long_line() {
        let data = vec![b'x'; 100];
        let lines = assemble(&data, 7);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].bytes.len(), 100);
        assert_eq!(lines[0].offset, 0);
    }

    #[test]
    fn test_chunk_without_newline_is_carried() {
        let mut assembler = LineAssembler::new(10);
        assert!(assembler.push_chunk(5, b"fghij".to_vec()).is_empty());
        assert_eq!(assembler.carried(), 5);
        assert_eq!(assembler.frontier(), 10);

        let lines = assembler.push_chunk(0, b"abc\nd".to_vec());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].offset, 4);
        assert_eq!(lines[0].bytes, b"dfghij");
        assert_eq!(assembler.frontier(), 4);

        let first = assembler.finish().unwrap();
        assert_eq!(first.bytes, b"abc\n");
        assert_eq!(assembler.frontier(), 0);
    }

    #[test]
    fn test_frontier_tracks_oldest_emitted_line() {
        let mut assembler = LineAssembler::new(12);
        let lines = assembler.push_chunk(6, b"cc\ndd\n".to_vec());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].offset, 9);
        assert_eq!(assembler.frontier(), 9);
    }

    #[test]
    fn test_finish_on_newline_terminated_start() {
        let mut assembler = LineAssembler::new(4);
        assert!(assembler.push_chunk(0, b"abc\n".to_vec()).is_empty());
        let first = assembler.finish().unwrap();
        assert_eq!(first.bytes, b"abc\n");
        assert!(assembler.finish().is_none());
    }
}
