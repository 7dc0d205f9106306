//! Incremental byte-stream to line decoding for decoder output.

const DELIMITER: u8 = b'\n';

/// Splits arbitrarily chunked bytes into complete lines.
///
/// Bytes after the last delimiter stay pending until more input arrives or
/// the stream is closed with [`LineFramer::finish`].
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
    // start of the first unconsumed byte in `buf`
    start: usize,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns the complete lines now available.
    ///
    /// The iterator is lazy: lines it does not yield stay buffered and come
    /// out of the next call.
    pub fn push(&mut self, chunk: &[u8]) -> Lines<'_> {
        self.buf.extend_from_slice(chunk);
        Lines { framer: self }
    }

    /// Flushes the pending fragment at stream close.
    pub fn finish(&mut self) -> Option<String> {
        let rest = &self.buf[self.start..];
        let line = if rest.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(rest).into_owned())
        };
        self.buf.clear();
        self.start = 0;
        line
    }

    /// Number of bytes waiting for a delimiter.
    pub fn pending(&self) -> usize {
        self.buf.len() - self.start
    }

    fn next_line(&mut self) -> Option<String> {
        let rest = &self.buf[self.start..];
        let pos = rest.iter().position(|&b| b == DELIMITER)?;
        let line = String::from_utf8_lossy(&rest[..pos]).into_owned();
        self.start += pos + 1;
        Some(line)
    }

    fn compact(&mut self) {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.start = 0;
        }
    }
}

/// Complete lines produced by one [`LineFramer::push`].
#[derive(Debug)]
pub struct Lines<'a> {
    framer: &'a mut LineFramer,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.framer.next_line()
    }
}

impl Drop for Lines<'_> {
    fn drop(&mut self) {
        self.framer.compact();
    }
}
