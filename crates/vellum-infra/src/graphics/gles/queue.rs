// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cross-thread access to the render thread: repaint requests and queued jobs.

use std::time::Duration;

use super::api::GlesApi;
use super::device::GlesDevice;

/// Requests frames from any thread.
///
/// Requests are coalesced: the channel holds at most one pending token, so
/// any number of requests made before the next frame produce a single frame.
#[derive(Debug, Clone)]
pub struct RepaintSignal {
    sender: flume::Sender<()>,
}

impl RepaintSignal {
    /// Requests one future frame. Never blocks.
    pub fn request(&self) {
        // Full means a frame is already pending; disconnected means the surface is gone.
        let _ = self.sender.try_send(());
    }
}

/// The render-thread side of a [`RepaintSignal`].
#[derive(Debug)]
pub struct FrameRequests {
    receiver: flume::Receiver<()>,
}

impl FrameRequests {
    /// Consumes the pending request, if any. Returns `true` if a frame was requested.
    pub fn take_pending(&self) -> bool {
        self.receiver.try_recv().is_ok()
    }

    /// Returns `true` if a frame is pending, without consuming it.
    pub fn is_pending(&self) -> bool {
        !self.receiver.is_empty()
    }

    /// Blocks until a frame is requested. Returns `false` if every signal was dropped.
    pub fn wait(&self) -> bool {
        self.receiver.recv().is_ok()
    }

    /// Like [`FrameRequests::wait`], giving up after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.receiver.recv_timeout(timeout).is_ok()
    }
}

/// Creates a connected repaint signal and frame-request receiver.
pub fn frame_channel() -> (RepaintSignal, FrameRequests) {
    let (sender, receiver) = flume::bounded(1);
    (RepaintSignal { sender }, FrameRequests { receiver })
}

/// A unit of work that must run on the render thread.
pub type RenderJob<G> = Box<dyn FnOnce(&mut GlesDevice<G>) + Send>;

/// Submits work to the render thread from any thread.
///
/// Jobs run at the start of the next frame callback, after initialization and
/// before the render callback, in submission order. Submitting a job also
/// requests a frame.
pub struct RenderQueue<G: GlesApi> {
    sender: flume::Sender<RenderJob<G>>,
    repaint: RepaintSignal,
}

impl<G: GlesApi> RenderQueue<G> {
    pub(crate) fn new(sender: flume::Sender<RenderJob<G>>, repaint: RepaintSignal) -> Self {
        Self { sender, repaint }
    }

    /// Enqueues `job`. Returns `false` if the surface no longer exists.
    pub fn submit(&self, job: impl FnOnce(&mut GlesDevice<G>) + Send + 'static) -> bool {
        if self.sender.send(Box::new(job)).is_err() {
            log::warn!("RenderQueue: Surface dropped, job discarded.");
            return false;
        }
        self.repaint.request();
        true
    }
}

impl<G: GlesApi> Clone for RenderQueue<G> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            repaint: self.repaint.clone(),
        }
    }
}

impl<G: GlesApi> std::fmt::Debug for RenderQueue<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderQueue")
            .field("pending", &self.sender.len())
            .finish()
    }
}
