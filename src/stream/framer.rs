//! Newline framing of the stream body.
//!
//! The body is a sequence of JSON objects separated by `\n` (or `\r\n`).
//! Chunks arrive on arbitrary boundaries, so bytes are buffered until a
//! newline completes a frame. Blank keep-alive lines never become frames.

use bytes::Bytes;

/// Splits a chunked body into complete, non-blank lines.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every frame it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            let line = &line[..line.len() - 1];
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            frames.push(Bytes::copy_from_slice(line));
        }
        frames
    }

    /// Bytes buffered without a terminating newline.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// End of body: an unterminated trailing line is discarded.
    ///
    /// Returns the number of bytes dropped.
    pub fn finish(&mut self) -> usize {
        let dropped = self.buffer.len();
        self.buffer.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_multiple_frames() {
        let mut framer = LineFramer::new();
        let frames = framer.push(b"{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(
            frames,
            vec![Bytes::from_static(b"{\"a\":1}"), Bytes::from_static(b"{\"b\":2}")]
        );
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"{\"event\":\"mes").is_empty());
        assert!(framer.push(b"sage\"").is_empty());
        let frames = framer.push(b"}\n{\"x\"");
        assert_eq!(frames, vec![Bytes::from_static(b"{\"event\":\"message\"}")]);
        assert_eq!(framer.pending(), 4);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let mut framer = LineFramer::new();
        let frames = framer.push(b"\r\n{\"a\":1}\r\n\n   \n{\"b\":2}\n");
        assert_eq!(
            frames,
            vec![Bytes::from_static(b"{\"a\":1}"), Bytes::from_static(b"{\"b\":2}")]
        );
    }

    #[test]
    fn test_multibyte_split_is_preserved() {
        let text = "{\"content\":\"caf\u{e9}\"}\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xc3).unwrap() + 1;

        let mut framer = LineFramer::new();
        assert!(framer.push(&text[..split]).is_empty());
        let frames = framer.push(&text[split..]);
        assert_eq!(
            std::str::from_utf8(&frames[0]).unwrap(),
            "{\"content\":\"caf\u{e9}\"}"
        );
    }

    #[test]
    fn test_finish_drops_partial_line() {
        let mut framer = LineFramer::new();
        framer.push(b"{\"a\":1}\n{\"trunc");
        assert_eq!(framer.finish(), 7);
        assert_eq!(framer.pending(), 0);
    }
}
