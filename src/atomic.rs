//! Atomic file replacement.
//!
//! Every rewrite goes through a temporary file created next to the target.
//! The temporary file is renamed over the target only after the full pass
//! succeeded; on any error it is dropped and removed, so readers never observe
//! a partially written file.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Whether a finished pass replaces the target or is thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Apply,
    DryRun,
}

impl WriteMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Apply
        }
    }

    pub fn is_apply(self) -> bool {
        self == WriteMode::Apply
    }
}

/// A pending replacement of `target`.
pub struct AtomicFile {
    target: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl AtomicFile {
    pub fn create(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        Ok(Self {
            target: target.to_path_buf(),
            writer: BufWriter::new(temp),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn writer(&mut self) -> &mut BufWriter<NamedTempFile> {
        &mut self.writer
    }

    /// Flush, sync and rename the temporary file over the target.
    ///
    /// The target keeps its permissions if it already existed.
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        let temp = self
            .writer
            .into_inner()
            .map_err(|e| Error::io(&target, e.into_error()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io(&target, e))?;

        if let Ok(metadata) = fs::metadata(&target) {
            fs::set_permissions(temp.path(), metadata.permissions())
                .map_err(|e| Error::io(&target, e))?;
        }

        temp.persist(&target).map_err(|e| Error::io(&target, e.error))?;
        Ok(())
    }

    /// Drop the pending output. The target is not touched.
    pub fn discard(self) {}
}

/// Stream `source` through `pass` into a replacement for `target`.
///
/// `source` and `target` may be the same path. The target is only replaced
/// when `pass` succeeds and `mode` is [`WriteMode::Apply`]. I/O errors raised
/// by the pass are reported against `source`.
pub fn rewrite<T, F>(source: &Path, target: &Path, mode: WriteMode, pass: F) -> Result<T>
where
    F: FnOnce(&mut BufReader<File>, &mut BufWriter<NamedTempFile>) -> io::Result<T>,
{
    let file = File::open(source).map_err(|e| Error::io(source, e))?;
    let mut reader = BufReader::new(file);
    let mut output = AtomicFile::create(target)?;

    let value = pass(&mut reader, output.writer()).map_err(|e| Error::io(source, e))?;
    output
        .writer()
        .flush()
        .map_err(|e| Error::io(output.target(), e))?;

    // Release the source handle before renaming over it.
    drop(reader);

    match mode {
        WriteMode::Apply => output.commit()?,
        WriteMode::DryRun => output.discard(),
    }
    Ok(value)
}
