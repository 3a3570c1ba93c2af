//! The animation task that keeps a particle field running on a surface.
//!
//! [`Animation`] owns the host's surface, the host's frame scheduler, and
//! at most one live [`ParticleField`]. It is either inactive (no field, no
//! pending frame) or active (a field and, normally, exactly one pending frame
//! handle). Hosts call [`Animation::on_frame`] whenever a requested frame
//! fires; the task draws and immediately requests the next one.
//!
//! [`Animation::stop`] cancels the pending frame through the scheduler, so a
//! frame requested before deactivation never reaches the surface.

use crate::error::FieldError;
use crate::field::{FieldParams, ParticleField};
use crate::prng::RandomSource;
use crate::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
use crate::surface::DrawSurface;

pub struct Animation<S: DrawSurface, H: FrameScheduler> {
    surface: S,
    scheduler: H,
    params: FieldParams,
    field: Option<ParticleField>,
    pending: Option<FrameHandle>,
    frames_drawn: u64,
}

impl<S: DrawSurface, H: FrameScheduler> Animation<S, H> {
    /// Creates an inactive task.
    ///
    /// Returns `FieldError::InvalidParam` if `params` fail validation.
    pub fn new(surface: S, scheduler: H, params: FieldParams) -> Result<Self, FieldError> {
        params.validate()?;
        Ok(Self {
            surface,
            scheduler,
            params,
            field: None,
            pending: None,
            frames_drawn: 0,
        })
    }

    /// Activates with a fresh random field sized to the surface's current
    /// dimensions and requests the first frame.
    ///
    /// If the surface has no usable area nothing starts and this returns
    /// `false`; an already active task is stopped. Starting an active task
    /// replaces its field.
    pub fn start(&mut self, rng: &mut dyn RandomSource) -> bool {
        let (width, height) = (self.surface.width(), self.surface.height());
        match ParticleField::activate(width, height, &self.params, rng) {
            Ok(field) => {
                self.start_with(field);
                true
            }
            Err(e) => {
                log::debug!("constellation activation skipped: {e}");
                self.stop();
                false
            }
        }
    }

    /// Activates with a prepared field.
    pub fn start_with(&mut self, field: ParticleField) {
        self.stop();
        log::debug!(
            "constellation activated: {} particles over {}x{}",
            field.len(),
            field.bounds().x,
            field.bounds().y
        );
        self.field = Some(field);
        self.frames_drawn = 0;
        self.schedule_next();
    }

    /// Draws one frame and schedules the next. Does nothing when inactive.
    pub fn on_frame(&mut self) {
        let Some(field) = self.field.as_mut() else {
            log::trace!("frame callback after deactivation ignored");
            return;
        };
        self.pending = None;
        field.advance_frame(&mut self.surface);
        self.frames_drawn += 1;
        log::trace!("constellation frame {}", self.frames_drawn);
        self.schedule_next();
    }

    /// Deactivates: cancels the pending frame and drops the particles.
    ///
    /// Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.field.take().is_some() {
            log::debug!("constellation deactivated after {} frames", self.frames_drawn);
        }
    }

    pub fn is_active(&self) -> bool {
        self.field.is_some()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// The frame requested but not yet delivered, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames drawn since the last activation.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut H {
        &mut self.scheduler
    }

    fn schedule_next(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("host refused to schedule a constellation frame; animation stalled");
        }
    }
}

impl<S: DrawSurface> Animation<S, ManualScheduler> {
    /// Fires up to `frames` requested frames, returning how many were drawn.
    ///
    /// Stops early once nothing is pending.
    pub fn pump(&mut self, frames: usize) -> usize {
        let mut drawn = 0;
        while drawn < frames && self.scheduler.fire().is_some() {
            self.on_frame();
            drawn += 1;
        }
        drawn
    }
}

impl<S: DrawSurface, H: FrameScheduler> Drop for Animation<S, H> {
    fn drop(&mut self) {
        self.stop();
    }
}
