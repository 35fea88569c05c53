/// Reassembles text lines from arbitrarily-split byte chunks.
///
/// Splitting happens on the raw bytes: `\n` (0x0A) can never occur inside a
/// multi-byte UTF-8 sequence, so a chunk boundary that lands mid-codepoint
/// just leaves the partial sequence in the buffer until the next chunk
/// completes it. Each completed line is decoded lossily and trimmed.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: Vec<u8>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and collect every line it completes, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buf[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            lines.push(decode_line(&self.buf[start..end]));
            start = end + 1;
        }
        self.buf.drain(..start);
        lines
    }

    /// The unterminated tail left after the last chunk, if any. The playlist
    /// parser drops it rather than treating it as a complete line.
    pub fn finish(self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let line = decode_line(&self.buf);
        (!line.is_empty()).then_some(line)
    }
}

fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_yields_all_terminated_lines() {
        let mut assembler = LineAssembler::new();
        let lines = assembler.feed(b"#EXTM3U\n#EXTINF:-1,Show\nhttp://host/1\n");
        assert_eq!(lines, vec!["#EXTM3U", "#EXTINF:-1,Show", "http://host/1"]);
        assert_eq!(assembler.finish(), None);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut assembler = LineAssembler::new();
        assert!(assembler.feed(b"#EXTINF:-1,Sh").is_empty());
        let lines = assembler.feed(b"ow\nhttp://host/1\n");
        assert_eq!(lines, vec!["#EXTINF:-1,Show", "http://host/1"]);
    }

    #[test]
    fn test_chunk_boundary_inside_utf8_codepoint() {
        let mut assembler = LineAssembler::new();
        // "Ação\n" split in the middle of the two-byte 'ç'.
        assert!(assembler.feed(b"A\xC3").is_empty());
        let lines = assembler.feed(b"\xA7\xC3\xA3o\n");
        assert_eq!(lines, vec!["Ação"]);
    }

    #[test]
    fn test_carriage_returns_are_trimmed() {
        let mut assembler = LineAssembler::new();
        let lines = assembler.feed(b"#EXTM3U\r\nhttp://host/1\r\n");
        assert_eq!(lines, vec!["#EXTM3U", "http://host/1"]);
    }

    #[test]
    fn test_finish_returns_unterminated_tail() {
        let mut assembler = LineAssembler::new();
        let lines = assembler.feed(b"first\nsecond without newline");
        assert_eq!(lines, vec!["first"]);
        assert_eq!(assembler.finish().as_deref(), Some("second without newline"));
    }

    #[test]
    fn test_finish_ignores_whitespace_only_tail() {
        let mut assembler = LineAssembler::new();
        assembler.feed(b"line\n   ");
        assert_eq!(assembler.finish(), None);
    }

    #[test]
    fn test_empty_chunks_are_harmless() {
        let mut assembler = LineAssembler::new();
        assert!(assembler.feed(b"").is_empty());
        let lines = assembler.feed(b"line\n");
        assert_eq!(lines, vec!["line"]);
    }
}
