//! Diagnostic line sinks
//!
//! The calibration routine reports each raw sample and the final estimate as
//! plain text lines, typically over a UART. Any byte-oriented transport works
//! through [`IoLineSink`].

/// A line-oriented diagnostic text sink
///
/// Purely observational: implementations must not fail the caller, so there
/// is no error type.
pub trait LineSink {
    /// Emit one line of text (without terminator)
    fn write_line(&mut self, line: &str);
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    #[inline]
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line)
    }
}

/// Sink that drops every line
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LineSink for NullSink {
    #[inline]
    fn write_line(&mut self, _line: &str) {}
}

/// Adapter from any [`embedded_io::Write`] transport to a [`LineSink`]
///
/// Each line is terminated with `"\r\n"`. Transport errors are dropped since
/// diagnostic output must never change calibration behavior.
#[derive(Debug)]
pub struct IoLineSink<W> {
    writer: W,
}

impl<W: embedded_io::Write> IoLineSink<W> {
    /// Wrap a byte writer
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: embedded_io::Write> LineSink for IoLineSink<W> {
    fn write_line(&mut self, line: &str) {
        let _ = self.writer.write_all(line.as_bytes());
        let _ = self.writer.write_all(b"\r\n");
        let _ = self.writer.flush();
    }
}
