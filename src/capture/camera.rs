use std::path::{Path, PathBuf};

use crate::assets::decode::decode_straight;
use crate::foundation::error::{SnapError, SnapResult};

/// A live frame source.
///
/// `open` acquires the device (and may be refused with
/// [`SnapError::CameraPermissionDenied`]); `grab_frame` reads the current frame synchronously;
/// `release` stops the device and must be safe to call more than once.
pub trait CameraSource {
    fn open(&mut self) -> SnapResult<()>;
    fn grab_frame(&mut self) -> SnapResult<image::RgbaImage>;
    fn release(&mut self);
}

/// Exclusive use of an opened camera; releases it when dropped.
pub struct CameraLease<'a, C: CameraSource + ?Sized> {
    camera: &'a mut C,
}

impl<'a, C: CameraSource + ?Sized> CameraLease<'a, C> {
    pub fn acquire(camera: &'a mut C) -> SnapResult<Self> {
        camera.open()?;
        tracing::debug!("camera acquired");
        Ok(Self { camera })
    }

    pub fn grab_frame(&mut self) -> SnapResult<image::RgbaImage> {
        self.camera.grab_frame()
    }
}

impl<C: CameraSource + ?Sized> Drop for CameraLease<'_, C> {
    fn drop(&mut self) {
        self.camera.release();
        tracing::debug!("camera released");
    }
}

/// Plays back image files from a directory in name order, looping at the end.
///
/// Stands in for a webcam on machines without one and for scripted booth runs.
#[derive(Debug)]
pub struct DirectoryCamera {
    dir: PathBuf,
    frames: Vec<PathBuf>,
    next: usize,
    open: bool,
}

impl DirectoryCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            frames: Vec::new(),
            next: 0,
            open: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
}

impl CameraSource for DirectoryCamera {
    fn open(&mut self) -> SnapResult<()> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => SnapError::CameraPermissionDenied(format!(
                "'{}': {e}",
                self.dir.display()
            )),
            _ => SnapError::camera(format!("open '{}': {e}", self.dir.display())),
        })?;
        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_frame_file(p))
            .collect();
        frames.sort();
        if frames.is_empty() {
            return Err(SnapError::camera(format!(
                "no png/jpeg frames in '{}'",
                self.dir.display()
            )));
        }
        self.frames = frames;
        self.next = 0;
        self.open = true;
        Ok(())
    }

    fn grab_frame(&mut self) -> SnapResult<image::RgbaImage> {
        if !self.open {
            return Err(SnapError::camera("camera is not open"));
        }
        let path = &self.frames[self.next % self.frames.len()];
        self.next += 1;
        let bytes = std::fs::read(path)
            .map_err(|e| SnapError::camera(format!("read frame '{}': {e}", path.display())))?;
        decode_straight(&bytes)
    }

    fn release(&mut self) {
        self.open = false;
        self.frames.clear();
    }
}

/// Serves in-memory frames in order, looping at the end.
#[derive(Clone, Debug, Default)]
pub struct MemoryCamera {
    frames: Vec<image::RgbaImage>,
    next: usize,
    open: bool,
    opens: usize,
    releases: usize,
    deny: bool,
}

impl MemoryCamera {
    pub fn new(frames: Vec<image::RgbaImage>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// A camera whose `open` is always refused.
    pub fn denied() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn opens(&self) -> usize {
        self.opens
    }

    pub fn releases(&self) -> usize {
        self.releases
    }
}

impl CameraSource for MemoryCamera {
    fn open(&mut self) -> SnapResult<()> {
        if self.deny {
            return Err(SnapError::CameraPermissionDenied(
                "camera access was refused".to_owned(),
            ));
        }
        if self.frames.is_empty() {
            return Err(SnapError::camera("no frames available"));
        }
        self.opens += 1;
        self.open = true;
        Ok(())
    }

    fn grab_frame(&mut self) -> SnapResult<image::RgbaImage> {
        if !self.open {
            return Err(SnapError::camera("camera is not open"));
        }
        let frame = self.frames[self.next % self.frames.len()].clone();
        self.next += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        if self.open {
            self.releases += 1;
        }
        self.open = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/camera.rs"]
mod tests;
