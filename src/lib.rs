//! Snapstrip turns three timed camera captures into a printable photo-booth strip.
//!
//! Two pure stages do the pixel work:
//!
//! - [`compose`] lays captures, title, and date into the fixed 600x1490 strip layout
//! - [`resolve`] re-projects stickers and text placed on a scaled preview into the strip's own
//!   pixels and burns them in
//!
//! [`Booth`] wires capture, editing, and export into a typed session.
#![forbid(unsafe_code)]

pub mod assets;
pub mod capture;
pub mod config;
pub mod export;
mod foundation;
pub mod logging;
pub mod overlay;
pub(crate) mod render;
pub mod session;
pub mod strip;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect};
pub use crate::foundation::error::{SnapError, SnapResult};
pub use crate::foundation::report::{Layer, RenderReport, Skipped};

pub use crate::assets::color::Color;
pub use crate::assets::import::{ImportKind, ImportedImage, import_image_bytes, import_image_file};
pub use crate::assets::text::{FontRole, Typesetter};
pub use crate::capture::camera::{CameraLease, CameraSource, DirectoryCamera, MemoryCamera};
pub use crate::capture::frame::Capture;
pub use crate::capture::sequencer::{
    CancelToken, CaptureSequencer, Clock, Interval, Phase, SequenceObserver, SystemClock,
};
pub use crate::config::{BoothConfig, ExportConfig, FontConfig, LoggingConfig};
pub use crate::export::sink::{DownloadSink, ExportReceipt, ExportSink, InMemorySink, PrintSink};
pub use crate::overlay::arena::{OverlayArena, PreviewSize};
pub use crate::overlay::document::OverlayDocument;
pub use crate::overlay::item::{ItemId, ItemTransform, OverlayItem, Sticker, TextItem};
pub use crate::overlay::palette::{
    DEFAULT_STICKERS, TEXT_COLORS, default_stickers, emoji_sticker, emoji_svg,
};
pub use crate::overlay::reference::ReferenceFrame;
pub use crate::overlay::resolver::{ResolvedImage, resolve};
pub use crate::session::{Aborted, Booth, Capturing, Editing, Finished, Idle, Rejected};
pub use crate::strip::compositor::{ComposedStrip, compose};
pub use crate::strip::date::{DateLocale, long_date, today};
pub use crate::strip::geometry::{SLOT_COUNT, StripGeometry, cover_fit};
pub use crate::strip::template::{Backdrop, Template, builtin_templates, find_template};
