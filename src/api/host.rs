use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::CandleHit;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;

/// Handle of one scheduled display-refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Handle of one attached pointer-move listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerListenerId(pub u64);

/// Host environment primitives the chart needs: a display-refresh scheduler
/// and pointer-move listeners.
pub trait FrameHost {
    fn request_frame(&mut self) -> ChartResult<FrameRequestId>;
    fn cancel_frame(&mut self, id: FrameRequestId);
    fn attach_pointer_listener(&mut self) -> ChartResult<PointerListenerId>;
    fn detach_pointer_listener(&mut self, id: PointerListenerId);
}

/// A chart attached to a host.
///
/// Mounting attaches the pointer listener and schedules the first frame.
/// Dropping the mount cancels the outstanding frame and detaches the
/// listener, including when mounting fails after the listener was attached.
pub struct ChartMount<'h, H: FrameHost> {
    host: &'h mut H,
    listener: Option<PointerListenerId>,
    pending_frame: Option<FrameRequestId>,
}

impl<'h, H: FrameHost> ChartMount<'h, H> {
    pub fn mount(host: &'h mut H) -> ChartResult<Self> {
        let mut mount = Self {
            host,
            listener: None,
            pending_frame: None,
        };
        mount.listener = Some(mount.host.attach_pointer_listener()?);
        mount.pending_frame = Some(mount.host.request_frame()?);
        debug!(
            listener = ?mount.listener,
            frame = ?mount.pending_frame,
            "chart mounted"
        );
        Ok(mount)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &*self.host
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.pending_frame
    }

    #[must_use]
    pub fn listener(&self) -> Option<PointerListenerId> {
        self.listener
    }

    /// Runs the frame callback `id`: schedules the next tick, then redraws if
    /// an input changed. Callbacks that are not the outstanding request are
    /// ignored and return `Ok(false)`.
    pub fn on_frame<R: Renderer>(
        &mut self,
        id: FrameRequestId,
        engine: &mut ChartEngine<R>,
    ) -> ChartResult<bool> {
        if self.pending_frame != Some(id) {
            trace!(?id, expected = ?self.pending_frame, "ignoring stale frame callback");
            return Ok(false);
        }

        self.pending_frame = None;
        self.pending_frame = Some(self.host.request_frame()?);
        engine.render_if_invalidated()
    }

    pub fn on_pointer_move<R: Renderer>(
        &mut self,
        engine: &mut ChartEngine<R>,
        client_x: f64,
        canvas_left: f64,
    ) -> CandleHit {
        if self.listener.is_none() {
            return CandleHit::NotFound;
        }
        engine.pointer_move_client(client_x, canvas_left)
    }

    pub fn on_pointer_leave<R: Renderer>(&mut self, engine: &mut ChartEngine<R>) {
        if self.listener.is_some() {
            engine.pointer_leave();
        }
    }

    /// Explicit teardown; equivalent to dropping the mount.
    pub fn unmount(self) {}
}

impl<H: FrameHost> Drop for ChartMount<'_, H> {
    fn drop(&mut self) {
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        if let Some(listener) = self.listener.take() {
            self.host.detach_pointer_listener(listener);
        }
        debug!("chart unmounted");
    }
}
