use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{SnapError, SnapResult};

/// Where a delivered image ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportReceipt {
    Saved(PathBuf),
    Printed { program: String },
    Stored { index: usize },
}

/// Final destination for a finished strip. Receives PNG bytes.
pub trait ExportSink {
    fn export(&mut self, png: &[u8]) -> SnapResult<ExportReceipt>;
}

pub fn download_file_name(millis: i64) -> String {
    format!("snapstrip-{millis}.png")
}

fn ensure_dir(dir: &Path) -> SnapResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        SnapError::export(format!("create output directory '{}': {e}", dir.display()))
    })
}

/// Saves each image as `snapstrip-<millis>.png` in a directory.
#[derive(Clone, Debug)]
pub struct DownloadSink {
    dir: PathBuf,
}

impl DownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First unused file name at or after `millis`.
    fn free_path(&self, millis: i64) -> PathBuf {
        let mut stamp = millis;
        loop {
            let path = self.dir.join(download_file_name(stamp));
            if !path.exists() {
                return path;
            }
            stamp += 1;
        }
    }
}

impl ExportSink for DownloadSink {
    fn export(&mut self, png: &[u8]) -> SnapResult<ExportReceipt> {
        ensure_dir(&self.dir)?;
        let path = self.free_path(chrono::Utc::now().timestamp_millis());
        std::fs::write(&path, png)
            .map_err(|e| SnapError::export(format!("write '{}': {e}", path.display())))?;
        tracing::info!(path = %path.display(), bytes = png.len(), "strip saved");
        Ok(ExportReceipt::Saved(path))
    }
}

/// Pipes the PNG to a host print command on stdin (`lp` by default).
#[derive(Clone, Debug)]
pub struct PrintSink {
    program: String,
    args: Vec<String>,
}

impl Default for PrintSink {
    fn default() -> Self {
        Self::new("lp", Vec::<String>::new())
    }
}

impl PrintSink {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from an argv list; the first element is the program.
    pub fn from_command(argv: &[String]) -> SnapResult<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| SnapError::validation("print command must not be empty"))?;
        Ok(Self::new(program.clone(), args.iter().cloned()))
    }
}

impl ExportSink for PrintSink {
    fn export(&mut self, png: &[u8]) -> SnapResult<ExportReceipt> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SnapError::export(format!("failed to spawn '{}': {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SnapError::export("failed to open print command stdin"))?;
        let written = stdin.write_all(png);
        drop(stdin);

        let output = child.wait_with_output().map_err(|e| {
            SnapError::export(format!("failed to wait for '{}': {e}", self.program))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnapError::export(format!(
                "'{}' exited with status {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| SnapError::export(format!("write to '{}': {e}", self.program)))?;

        tracing::info!(program = %self.program, bytes = png.len(), "strip sent to printer");
        Ok(ExportReceipt::Printed {
            program: self.program.clone(),
        })
    }
}

/// Keeps exported images in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    pub images: Vec<Vec<u8>>,
}

impl ExportSink for InMemorySink {
    fn export(&mut self, png: &[u8]) -> SnapResult<ExportReceipt> {
        self.images.push(png.to_vec());
        Ok(ExportReceipt::Stored {
            index: self.images.len() - 1,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
