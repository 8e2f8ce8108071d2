//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file.
///
/// Each record is written with one `write_all` while holding an exclusive
/// advisory lock on the file, so processes sharing the file do not interleave.
pub struct FileSink {
    file: Mutex<File>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.file.lock();
        file.lock_exclusive()?;
        let written = file.write_all(buf);
        let unlocked = FileExt::unlock(&*file);
        written?;
        unlocked?;
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        self.file.lock().sync_data()
    }

    fn name(&self) -> &str {
        "file"
    }
}
