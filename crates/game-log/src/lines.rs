//! Splits tailed chunks into lines.
//!
//! Chunk boundaries fall wherever the game happened to flush, so the text
//! after the last separator is held back and joined with the next chunk.

/// Longest unterminated fragment kept between chunks. Anything longer means
/// the separator is not the one the file uses, so the fragment is dropped.
pub const MAX_PENDING: usize = 1024 * 1024;

/// Incremental line splitter for one byte stream.
#[derive(Debug)]
pub struct LineSplitter {
    separator: Vec<u8>,
    carry: Vec<u8>,
    /// Offset into `carry` where the next separator search starts.
    scan_from: usize,
}

impl LineSplitter {
    /// Creates a splitter for the given separator. An empty separator falls
    /// back to `"\n"`.
    pub fn new(separator: &str) -> Self {
        let separator = if separator.is_empty() {
            b"\n".to_vec()
        } else {
            separator.as_bytes().to_vec()
        };
        Self {
            separator,
            carry: Vec::new(),
            scan_from: 0,
        }
    }

    /// Appends `chunk` and returns every line it completes, in order.
    ///
    /// A trailing `\r` is removed and empty lines are skipped. Invalid UTF-8
    /// is replaced rather than rejected.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.carry.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        let mut from = self.scan_from;
        while let Some(pos) = find(&self.carry[from..], &self.separator) {
            let end = from + pos;
            let mut line = &self.carry[start..end];
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }
            if !line.is_empty() {
                lines.push(String::from_utf8_lossy(line).into_owned());
            }
            start = end + self.separator.len();
            from = start;
        }

        self.carry.drain(..start);

        if self.carry.len() > MAX_PENDING {
            tracing::warn!(
                target: "hslog::main",
                pending = self.carry.len(),
                separator = ?String::from_utf8_lossy(&self.separator),
                "no line separator found, dropping unterminated data"
            );
            self.carry.clear();
        }

        // The held-back bytes hold no full separator, only possibly its prefix.
        self.scan_from = self
            .carry
            .len()
            .saturating_sub(self.separator.len() - 1);
        lines
    }

    /// Returns the unterminated fragment currently held back.
    pub(crate) fn pending(&self) -> &[u8] {
        &self.carry
    }

    /// Drops any held-back fragment.
    pub fn reset(&mut self) {
        self.carry.clear();
        self.scan_from = 0;
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_complete_lines() {
        let mut splitter = LineSplitter::new("\n");
        let lines = splitter.push(b"one\ntwo\nthree\n");
        assert_eq!(lines, vec!["one", "two", "three"]);
        assert!(splitter.pending().is_empty());
    }

    #[test]
    fn joins_line_split_across_chunks() {
        let mut splitter = LineSplitter::new("\n");
        assert_eq!(splitter.push(b"D 15:08:54.06 NotifyOfCard"), Vec::<String>::new());
        assert_eq!(splitter.pending(), b"D 15:08:54.06 NotifyOfCard");

        let lines = splitter.push(b"Gained: [name=X]\nnext");
        assert_eq!(lines, vec!["D 15:08:54.06 NotifyOfCardGained: [name=X]"]);
        assert_eq!(splitter.pending(), b"next");
    }

    #[test]
    fn multi_byte_separator_split_across_chunks() {
        let mut splitter = LineSplitter::new("\r\n");
        assert_eq!(splitter.push(b"alpha\r"), Vec::<String>::new());
        assert_eq!(splitter.push(b"\nbeta\r\n"), vec!["alpha", "beta"]);
    }

    #[test]
    fn utf8_sequence_split_across_chunks() {
        let mut splitter = LineSplitter::new("\n");
        let text = "name=Ragnaros éclair\n".as_bytes();
        let cut = text.iter().position(|b| *b >= 0x80).unwrap() + 1;
        assert!(splitter.push(&text[..cut]).is_empty());
        assert_eq!(splitter.push(&text[cut..]), vec!["name=Ragnaros éclair"]);
    }

    #[test]
    fn strips_carriage_return_and_skips_blank_lines() {
        let mut splitter = LineSplitter::new("\n");
        let lines = splitter.push(b"first\r\n\r\n\nsecond\r\n");
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn reset_discards_fragment() {
        let mut splitter = LineSplitter::new("\n");
        splitter.push(b"stale frag");
        splitter.reset();
        assert_eq!(splitter.push(b"ment\n"), vec!["ment"]);
    }

    #[test]
    fn mismatched_separator_keeps_memory_bounded() {
        let mut splitter = LineSplitter::new("\r\n");
        let line = b"D 15:08:54.0669559 NotifyOfCardGained: [name=Bookie cardId=TRL_504] NORMAL 1\n";

        let pushes = MAX_PENDING / line.len() * 2;
        for _ in 0..pushes {
            assert!(splitter.push(line).is_empty());
            assert!(splitter.pending().len() <= MAX_PENDING);
        }

        let lines = splitter.push(b"\r\nrecovered\r\n");
        assert_eq!(lines.last().map(String::as_str), Some("recovered"));
    }

    #[test]
    fn separator_prefix_held_across_many_chunks() {
        let mut splitter = LineSplitter::new("\r\n");
        for part in [&b"ab"[..], b"cd", b"ef\r"] {
            assert!(splitter.push(part).is_empty());
        }
        assert_eq!(splitter.push(b"\ngh\r\n"), vec!["abcdef", "gh"]);
        assert!(splitter.pending().is_empty());
    }

    #[test]
    fn empty_separator_defaults_to_newline() {
        let mut splitter = LineSplitter::new("");
        assert_eq!(splitter.push(b"a\nb\n"), vec!["a", "b"]);
    }
}
