use std::cell::Cell;
use std::io::Write;

/// Tracks the number of bytes accepted by the wrapped writer.
///
/// The tally lives outside the writer so it remains readable
/// after the writer is consumed or an error aborts the write.
pub(crate) struct CountingWriter<'a, W> {
    inner: W,
    count: &'a Cell<u64>,
}

impl<'a, W: Write> CountingWriter<'a, W> {
    pub(crate) fn new(inner: W, count: &'a Cell<u64>) -> Self {
        Self { inner, count }
    }
}

impl<W: Write> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count.set(self.count.get() + written as u64);
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
