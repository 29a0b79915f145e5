//! Redraw scheduling
//!
//! One pending redraw request per loop. The host (requestAnimationFrame in
//! the browser) calls back into `on_frame`, which advances the animator,
//! paints the surface and asks for the next frame. Stopping or dropping the
//! loop cancels the pending request, so no callback outlives the surface.

use crate::animator::{Animator, FrameOutput};
use crate::error::OrbError;
use crate::motion::Intents;
use crate::render::OrbSurface;
use crate::sim::Viewport;

/// Host-assigned id of a pending redraw request
pub type FrameId = i32;

/// Provider of redraw callbacks
pub trait FrameHost {
    fn request_frame(&mut self) -> Result<FrameId, OrbError>;
    fn cancel_frame(&mut self, id: FrameId);
}

pub struct FrameLoop<H: FrameHost, S: OrbSurface> {
    host: H,
    surface: S,
    animator: Animator,
    pending: Option<FrameId>,
}

impl<H: FrameHost, S: OrbSurface> FrameLoop<H, S> {
    /// Request the first frame. On error nothing is left scheduled.
    pub fn start(host: H, surface: S, animator: Animator) -> Result<Self, OrbError> {
        let mut frame_loop = Self {
            host,
            surface,
            animator,
            pending: None,
        };
        frame_loop.schedule()?;
        Ok(frame_loop)
    }

    /// Host callback for a granted frame
    pub fn on_frame(
        &mut self,
        now_ms: f64,
        viewport: Viewport,
        intents: Intents,
    ) -> Result<FrameOutput, OrbError> {
        self.pending = None;
        let output = self.animator.advance(now_ms, viewport, intents);
        self.surface.apply(&output);
        self.schedule()?;
        Ok(output)
    }

    /// Cancel the pending frame; the loop stays idle until dropped
    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.host.cancel_frame(id);
            log::debug!("Canceled frame {}", id);
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    fn schedule(&mut self) -> Result<(), OrbError> {
        self.pending = Some(self.host.request_frame()?);
        Ok(())
    }
}

impl<H: FrameHost, S: OrbSurface> Drop for FrameLoop<H, S> {
    fn drop(&mut self) {
        self.stop();
    }
}
