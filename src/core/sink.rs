//! Sink trait for byte output destinations

use crate::sinks::FailoverSink;
use std::io;

/// An append-only byte destination.
///
/// Sinks are shared between loggers, so `write` takes `&self`; implementations
/// serialize concurrent writers internally so records never interleave.
pub trait Sink: Send + Sync {
    /// Write the whole buffer, returning the number of bytes written.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// The failover sink behind this sink, if it is one.
    fn as_failover(&self) -> Option<&FailoverSink> {
        None
    }
}
