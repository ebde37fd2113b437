//! One booth session as a typed state machine.
//!
//! `Idle -> Capturing -> Editing -> Finished -> Idle`, with `Editing -> Capturing` for a retake
//! and `Capturing -> Idle` when capture fails or is cancelled. Each state is its own type, so a
//! transition that is not listed here does not compile.

use crate::assets::import::ImportedImage;
use crate::assets::text::Typesetter;
use crate::capture::camera::CameraSource;
use crate::capture::frame::Capture;
use crate::capture::sequencer::{CaptureSequencer, Clock, Interval, SequenceObserver};
use crate::config::BoothConfig;
use crate::export::sink::{ExportReceipt, ExportSink};
use crate::foundation::error::{SnapError, SnapResult};
use crate::overlay::arena::OverlayArena;
use crate::overlay::reference::ReferenceFrame;
use crate::overlay::resolver::{ResolvedImage, resolve};
use crate::strip::compositor::{ComposedStrip, compose};
use crate::strip::date::{DateLocale, today};
use crate::strip::geometry::StripGeometry;
use crate::strip::template::{Template, find_template};

/// Settings and fonts shared by every state.
struct Studio {
    event_name: String,
    template: Template,
    countdown: Interval,
    date_locale: DateLocale,
    date_override: Option<String>,
    geometry: StripGeometry,
    typesetter: Typesetter,
}

impl Studio {
    fn date(&self) -> String {
        self.date_override
            .clone()
            .unwrap_or_else(|| today(self.date_locale))
    }

    fn compose(&mut self, photos: &[Capture]) -> SnapResult<ComposedStrip> {
        let date = self.date();
        compose(
            photos,
            &self.event_name,
            &date,
            &self.template,
            &mut self.typesetter,
            &self.geometry,
        )
    }
}

/// Waiting for a guest; event name and template can be changed.
pub struct Idle;

/// Counting down and taking photos.
pub struct Capturing;

/// Photos taken and composed; overlay items are being placed.
pub struct Editing {
    captures: Vec<Capture>,
    strip: ComposedStrip,
    arena: OverlayArena,
    reference: ReferenceFrame,
}

/// Overlays burned in; ready to export.
pub struct Finished {
    image: ResolvedImage,
}

pub struct Booth<S> {
    studio: Studio,
    state: S,
}

/// A transition that failed, handing back the booth in the state it fell back to.
pub struct Rejected<S> {
    pub booth: Booth<S>,
    pub error: SnapError,
}

/// Capture ended early; the booth is back to [`Idle`].
pub type Aborted = Rejected<Idle>;

impl<S> std::fmt::Debug for Rejected<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<S> std::fmt::Debug for Booth<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Booth")
            .field("state", &std::any::type_name::<S>())
            .field("event_name", &self.studio.event_name)
            .field("template", &self.studio.template.id)
            .finish_non_exhaustive()
    }
}

impl<S> Booth<S> {
    fn with_state<T>(self, state: T) -> Booth<T> {
        Booth {
            studio: self.studio,
            state,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.studio.event_name
    }

    pub fn template(&self) -> &Template {
        &self.studio.template
    }

    pub fn countdown(&self) -> Interval {
        self.studio.countdown
    }
}

impl Booth<Idle> {
    /// Start a booth from `config`; the template id must name a built-in template.
    pub fn new(config: &BoothConfig, typesetter: Typesetter) -> SnapResult<Self> {
        config.validate()?;
        let template = find_template(&config.template).ok_or_else(|| {
            SnapError::validation(format!("unknown template \"{}\"", config.template))
        })?;
        Ok(Self {
            studio: Studio {
                event_name: config.event_name.clone(),
                template,
                countdown: config.countdown,
                date_locale: config.date_locale,
                date_override: None,
                geometry: config.geometry.clone(),
                typesetter,
            },
            state: Idle,
        })
    }

    /// Print `date` in the footer instead of today's date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.studio.date_override = Some(date.into());
        self
    }

    pub fn set_event_name(&mut self, name: impl Into<String>) {
        self.studio.event_name = name.into();
    }

    pub fn set_template(&mut self, template: Template) {
        self.studio.template = template;
    }

    /// Switch to a custom template built around an imported image.
    pub fn use_background(&mut self, image: &ImportedImage) {
        self.studio.template = Template::custom(image);
    }

    pub fn set_countdown(&mut self, countdown: Interval) {
        self.studio.countdown = countdown;
    }

    pub fn start(self) -> Booth<Capturing> {
        tracing::info!(event = %self.studio.event_name, template = %self.studio.template.id, "session started");
        self.with_state(Capturing)
    }
}

impl Booth<Capturing> {
    /// Run the countdown and shutter sequence, then compose the strip.
    pub fn run<K: Clock, C: CameraSource + ?Sized>(
        self,
        sequencer: &mut CaptureSequencer<K>,
        camera: &mut C,
        observer: &mut dyn SequenceObserver,
    ) -> Result<Booth<Editing>, Aborted> {
        let interval = self.studio.countdown;
        match sequencer.run(interval, camera, observer) {
            Ok(captures) => self.complete(captures),
            Err(error) => {
                tracing::warn!(%error, "capture aborted");
                Err(Aborted {
                    booth: self.abort(),
                    error,
                })
            }
        }
    }

    /// Accept externally captured photos and compose the strip.
    pub fn complete(mut self, captures: Vec<Capture>) -> Result<Booth<Editing>, Aborted> {
        let composed = self.studio.compose(&captures).and_then(|strip| {
            let reference = ReferenceFrame::native(strip.width)?;
            Ok((strip, reference))
        });
        match composed {
            Ok((strip, reference)) => Ok(self.with_state(Editing {
                captures,
                strip,
                arena: OverlayArena::new(),
                reference,
            })),
            Err(error) => Err(Aborted {
                booth: self.abort(),
                error,
            }),
        }
    }

    pub fn abort(self) -> Booth<Idle> {
        self.with_state(Idle)
    }
}

impl Booth<Editing> {
    pub fn captures(&self) -> &[Capture] {
        &self.state.captures
    }

    pub fn strip(&self) -> &ComposedStrip {
        &self.state.strip
    }

    pub fn arena(&self) -> &OverlayArena {
        &self.state.arena
    }

    pub fn arena_mut(&mut self) -> &mut OverlayArena {
        &mut self.state.arena
    }

    pub fn reference(&self) -> ReferenceFrame {
        self.state.reference
    }

    /// Width the preview is displayed at; overlay coordinates are read in this frame.
    pub fn set_reference(&mut self, reference: ReferenceFrame) {
        self.state.reference = reference;
    }

    /// Swap the template and recompose. Overlay items are kept.
    ///
    /// If the strip cannot be recomposed, the previous template and strip stay in place.
    pub fn set_template(&mut self, template: Template) -> SnapResult<()> {
        let previous = std::mem::replace(&mut self.studio.template, template);
        if let Err(e) = self.recompose() {
            self.studio.template = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Rename the event and recompose; on failure the previous name is kept.
    pub fn set_event_name(&mut self, name: impl Into<String>) -> SnapResult<()> {
        let previous = std::mem::replace(&mut self.studio.event_name, name.into());
        if let Err(e) = self.recompose() {
            self.studio.event_name = previous;
            return Err(e);
        }
        Ok(())
    }

    fn recompose(&mut self) -> SnapResult<()> {
        self.state.strip = self.studio.compose(&self.state.captures)?;
        Ok(())
    }

    /// Throw away photos and overlays and capture again.
    pub fn retake(self) -> Booth<Capturing> {
        self.with_state(Capturing)
    }

    /// Burn the overlays into the strip. On failure the booth stays in editing.
    pub fn finish(mut self) -> Result<Booth<Finished>, Rejected<Editing>> {
        let stickers: Vec<_> = self.state.arena.stickers().cloned().collect();
        let texts: Vec<_> = self.state.arena.texts().cloned().collect();
        match resolve(
            &self.state.strip.png,
            self.state.reference,
            &stickers,
            &texts,
            &mut self.studio.typesetter,
        ) {
            Ok(image) => Ok(self.with_state(Finished { image })),
            Err(error) => Err(Rejected { booth: self, error }),
        }
    }
}

impl Booth<Finished> {
    pub fn image(&self) -> &ResolvedImage {
        &self.state.image
    }

    pub fn export(&self, sink: &mut dyn ExportSink) -> SnapResult<ExportReceipt> {
        sink.export(&self.state.image.png)
    }

    /// Discard the session and wait for the next guest.
    pub fn home(self) -> Booth<Idle> {
        self.with_state(Idle)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
