use super::backing::Backing;
use crate::error::{LedgerError, Result};
use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Cursor, Read};

/// In-memory backing for tests. Does NOT persist data.
///
/// Uses `RefCell` since stores are single-threaded; this lets `Backing`
/// take `&self` everywhere, same as the file implementation.
#[derive(Default)]
pub struct MemBacking {
    content: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
    read_error_after: RefCell<Option<usize>>,
}

/// Serves a prefix of the content, then fails every further read.
struct TruncatedReader {
    inner: Cursor<Vec<u8>>,
}

impl Read for TruncatedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            return Err(io::Error::other("simulated read error"));
        }
        Ok(n)
    }
}

impl MemBacking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw file content, as if a backing file already existed.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            ..Default::default()
        }
    }

    /// Raw content as it would be on disk, `None` if never written.
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Replaces the raw content behind the store's back.
    pub fn set_content(&self, content: impl Into<String>) {
        *self.content.borrow_mut() = Some(content.into());
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Makes reads fail once `lines` complete lines have been served.
    /// `None` turns the failure off.
    pub fn set_read_error_after(&self, lines: Option<usize>) {
        *self.read_error_after.borrow_mut() = lines;
    }
}

impl Backing for MemBacking {
    fn open_rows(&self) -> Result<Option<Box<dyn BufRead + '_>>> {
        let content = match self.content.borrow().clone() {
            Some(content) => content,
            None => return Ok(None),
        };

        let reader: Box<dyn BufRead + '_> = match *self.read_error_after.borrow() {
            Some(lines) => {
                let prefix: String = content.split_inclusive('\n').take(lines).collect();
                Box::new(BufReader::new(TruncatedReader {
                    inner: Cursor::new(prefix.into_bytes()),
                }))
            }
            None => Box::new(Cursor::new(content.into_bytes())),
        };
        Ok(Some(reader))
    }

    fn write_rows(&self, rows: &[String]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(LedgerError::Io(io::Error::other("simulated write error")));
        }
        let mut out = String::new();
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
        *self.content.borrow_mut() = Some(out);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
