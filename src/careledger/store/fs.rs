use super::backing::Backing;
use crate::error::{LedgerError, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

/// Rows kept in a plain text file, one record per line.
pub struct FileBacking {
    path: PathBuf,
}

impl FileBacking {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(LedgerError::Io)?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rows".to_string());
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

impl Backing for FileBacking {
    fn open_rows(&self) -> Result<Option<Box<dyn BufRead + '_>>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(Box::new(BufReader::new(file)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::Io(e)),
        }
    }

    fn write_rows(&self, rows: &[String]) -> Result<()> {
        self.ensure_parent()?;

        // Write to a sibling temp file, then rename over the target.
        let tmp = self.tmp_path();
        let written = (|| -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            for row in rows {
                writeln!(writer, "{}", row)?;
            }
            writer.flush()?;
            Ok(())
        })();

        if let Err(e) = written.and_then(|_| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(LedgerError::Io(e));
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "rewrote backing file");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_as_none() {
        let dir = TempDir::new().unwrap();
        let backing = FileBacking::new(dir.path().join("facilities.txt"));
        assert!(backing.open_rows().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_and_terminates_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("inventory.txt");
        let backing = FileBacking::new(&path);

        backing
            .write_rows(&["I1,Gauze,10,2025-01-01,Supply".to_string()])
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "I1,Gauze,10,2025-01-01,Supply\n"
        );
    }

    #[test]
    fn write_replaces_previous_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("facilities.txt");
        fs::write(&path, "a,b,c\nd,e,f\n").unwrap();
        let backing = FileBacking::new(&path);

        backing.write_rows(&["x,y,z".to_string()]).unwrap();

        let mut content = String::new();
        backing
            .open_rows()
            .unwrap()
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "x,y,z\n");
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let backing = FileBacking::new(dir.path().join("facilities.txt"));
        backing.write_rows(&["a,b,c".to_string()]).unwrap();

        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().into_owned();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn empty_collection_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("facilities.txt");
        FileBacking::new(&path).write_rows(&[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
