use crate::error::Result;
use std::io::BufRead;

/// Raw row I/O for a single record collection.
///
/// This trait handles where rows live (a file, memory), while
/// [`RecordStore`](super::RecordStore) handles what they mean.
pub trait Backing {
    /// Opens the rows for reading.
    /// Returns `Ok(None)` when nothing has been persisted yet.
    /// Returns `Err` only on actual I/O errors (permissions, disk failure).
    fn open_rows(&self) -> Result<Option<Box<dyn BufRead + '_>>>;

    /// Replaces every persisted row. MUST be atomic so a failed write leaves
    /// the previous rows intact.
    fn write_rows(&self, rows: &[String]) -> Result<()>;

    /// Human readable location, used in messages and logs.
    fn describe(&self) -> String;
}
