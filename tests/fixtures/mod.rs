//! Shared helpers for scanning real files on disk.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use logtail::ScanConfig;
use tempfile::TempDir;

/// A log file inside its own temporary directory.
pub struct LogFixture {
    pub dir: TempDir,
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl LogFixture {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let content = content.into();
        fs::write(&path, &content).unwrap();
        Self { dir, path, content }
    }

    /// "Log line 1" through "Log line {count}", one per line.
    pub fn numbered(count: usize) -> Self {
        Self::new(numbered(count))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

pub fn numbered(count: usize) -> String {
    (1..=count).map(|i| format!("Log line {}\n", i)).collect()
}

/// Lines of varied length, including empty, CRLF and multi-chunk lines.
pub fn ragged() -> String {
    let mut content = String::new();
    for i in 0..300 {
        match i % 7 {
            0 => content.push('\n'),
            1 => content.push_str(&format!("ERROR request {} failed\r\n", i)),
            2 => content.push_str(&format!("{}\n", "y".repeat(i % 97 + 40))),
            3 => content.push_str(&format!("INFO héllo wörld {}\n", i)),
            _ => content.push_str(&format!("DEBUG {}\n", i)),
        }
    }
    content.push_str("trailing fragment without newline");
    content
}

/// Every line of `content`, newest first, decoded the way the scanner does.
pub fn brute_force(content: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(content)
        .split_inclusive('\n')
        .map(|line| line.trim_end().to_string())
        .rev()
        .collect()
}

pub fn scan_config(chunk_size: usize) -> ScanConfig {
    ScanConfig {
        chunk_size,
        max_lines: 200_000,
        read_timeout_ms: 60_000,
    }
}
