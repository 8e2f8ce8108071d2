//! Primary/fallback sink pair

use crate::core::Sink;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Writes to a primary sink and substitutes a fallback sink when the primary fails.
///
/// On a primary error the same bytes are written to the fallback and the
/// fallback's result is returned in place of the primary's. There is no third
/// level: a fallback error is returned as is.
///
/// Writes from concurrent callers are serialized, so records never interleave.
///
/// # Example
///
/// ```
/// use logharbour::sinks::{FailoverSink, MemorySink, Sink};
/// use std::sync::Arc;
///
/// let primary = Arc::new(MemorySink::new());
/// let fallback = Arc::new(MemorySink::new());
/// let sink = FailoverSink::new(primary.clone(), fallback.clone());
///
/// sink.write(b"hello\n").unwrap();
/// assert_eq!(primary.contents(), "hello\n");
/// assert!(fallback.is_empty());
/// ```
pub struct FailoverSink {
    primary: Arc<dyn Sink>,
    fallback: Arc<dyn Sink>,
    lock: Mutex<()>,
}

impl FailoverSink {
    pub fn new(primary: Arc<dyn Sink>, fallback: Arc<dyn Sink>) -> Self {
        Self {
            primary,
            fallback,
            lock: Mutex::new(()),
        }
    }

    pub fn primary(&self) -> &Arc<dyn Sink> {
        &self.primary
    }

    pub fn fallback(&self) -> &Arc<dyn Sink> {
        &self.fallback
    }

    /// Write straight to the fallback branch, bypassing the primary.
    ///
    /// Serialized with regular writes.
    pub fn write_fallback(&self, buf: &[u8]) -> io::Result<usize> {
        let _guard = self.lock.lock();
        self.fallback.write(buf)
    }
}

impl Sink for FailoverSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let _guard = self.lock.lock();
        match self.primary.write(buf) {
            Ok(n) => Ok(n),
            Err(primary_err) => {
                tracing::debug!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %primary_err,
                    "primary sink write failed, writing to fallback"
                );
                self.fallback.write(buf)
            }
        }
    }

    fn flush(&self) -> io::Result<()> {
        let _guard = self.lock.lock();
        let primary = self.primary.flush();
        let fallback = self.fallback.flush();
        primary.and(fallback)
    }

    fn name(&self) -> &str {
        "failover"
    }

    fn as_failover(&self) -> Option<&FailoverSink> {
        Some(self)
    }
}

impl std::fmt::Debug for FailoverSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverSink")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}
