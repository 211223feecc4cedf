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

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use vellum_core::renderer::{GraphicsDeviceFactory, RenderError, RenderMode, SurfaceSettings};

use super::api::GlesApi;
use super::device::GlesDevice;
use super::factory::GlesDeviceFactory;
use super::latch::InitLatch;
use super::queue::{frame_channel, FrameRequests, RenderJob, RenderQueue, RepaintSignal};

/// The per-frame render callback.
pub type RenderCallback<G> = Box<dyn FnMut(&mut GlesDevice<G>) -> Result<(), RenderError>>;

/// The one-time initialization callback.
pub type ReadyCallback<G> = Box<dyn FnOnce(&mut GlesDevice<G>)>;

/// Drives a [`GlesDevice`] from the native surface callbacks.
///
/// The host forwards the three surface callbacks (`created`, `changed`,
/// `draw`). Each of them runs, in order: the one-time initialization, every
/// queued [`RenderQueue`] job, and the render callback. In
/// [`RenderMode::WhenDirty`] the host only draws when
/// [`GlesSurface::needs_frame`] says so.
pub struct GlesSurface<G: GlesApi> {
    device: GlesDevice<G>,
    settings: SurfaceSettings,
    latch: InitLatch,
    on_ready: Option<ReadyCallback<G>>,
    render: RenderCallback<G>,
    jobs: flume::Receiver<RenderJob<G>>,
    job_sender: flume::Sender<RenderJob<G>>,
    repaint: RepaintSignal,
    frames: FrameRequests,
    frame_count: u64,
}

impl<G: GlesApi> GlesSurface<G> {
    /// Creates a surface on top of `gl` that calls `render` once per frame.
    ///
    /// # Errors
    ///
    /// `RenderError::InitializationFailed` if `settings` are invalid.
    pub fn new(
        gl: G,
        settings: SurfaceSettings,
        render: impl FnMut(&mut GlesDevice<G>) -> Result<(), RenderError> + 'static,
    ) -> Result<Self, RenderError> {
        settings.validate()?;

        let (repaint, frames) = frame_channel();
        let factory = GlesDeviceFactory::new(repaint.clone());
        let mut device = factory.create(Rc::new(gl))?;
        device.set_back_size(settings.initial_width, settings.initial_height);
        let (job_sender, jobs) = flume::unbounded();

        log::info!(
            "GlesSurface: Created {}x{} surface (GLES {}, {:?}).",
            settings.initial_width,
            settings.initial_height,
            settings.client_version,
            settings.render_mode
        );

        Ok(Self {
            device,
            settings,
            latch: InitLatch::new(),
            on_ready: None,
            render: Box::new(render),
            jobs,
            job_sender,
            repaint,
            frames,
            frame_count: 0,
        })
    }

    /// Registers a callback run once, before the first frame is rendered.
    pub fn on_ready(mut self, ready: impl FnOnce(&mut GlesDevice<G>) + 'static) -> Self {
        self.on_ready = Some(Box::new(ready));
        self
    }

    /// The native surface was created.
    pub fn on_surface_created(&mut self) -> Result<(), RenderError> {
        log::debug!("GlesSurface: Surface created.");
        self.frame()
    }

    /// The native surface was resized to `width` x `height`.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        log::info!("GlesSurface: Surface resized to {width}x{height}.");
        self.device.resize(width, height);
        self.frame()
    }

    /// The native surface asks for a frame.
    pub fn on_draw_frame(&mut self) -> Result<(), RenderError> {
        self.frame()
    }

    fn frame(&mut self) -> Result<(), RenderError> {
        // This frame answers every request made so far.
        self.frames.take_pending();

        let device = &mut self.device;
        let on_ready = &mut self.on_ready;
        if self.latch.run_once(|| {
            if let Some(ready) = on_ready.take() {
                ready(device);
            }
        }) {
            log::info!("GlesSurface: Initialized.");
        }

        while let Ok(job) = self.jobs.try_recv() {
            job(&mut self.device);
        }

        self.frame_count += 1;
        (self.render)(&mut self.device)
    }

    /// Returns `true` if the host should produce a frame now.
    pub fn needs_frame(&self) -> bool {
        match self.settings.render_mode {
            RenderMode::Continuously => true,
            RenderMode::WhenDirty => self.frames.is_pending(),
        }
    }

    /// Blocks until a frame is requested or `timeout` elapses.
    ///
    /// Returns immediately in continuous mode.
    pub fn wait_for_frame(&self, timeout: Duration) -> bool {
        match self.settings.render_mode {
            RenderMode::Continuously => true,
            RenderMode::WhenDirty => self.frames.is_pending() || self.peek_wait(timeout),
        }
    }

    fn peek_wait(&self, timeout: Duration) -> bool {
        // Waiting consumes the token; put it back so the next frame still sees it.
        if self.frames.wait_timeout(timeout) {
            self.repaint.request();
            true
        } else {
            false
        }
    }

    /// A handle other threads can use to request frames.
    pub fn repaint_signal(&self) -> RepaintSignal {
        self.repaint.clone()
    }

    /// A handle other threads can use to run work on the render thread.
    pub fn render_queue(&self) -> RenderQueue<G> {
        RenderQueue::new(self.job_sender.clone(), self.repaint.clone())
    }

    /// The device.
    pub fn device(&self) -> &GlesDevice<G> {
        &self.device
    }

    /// The device, mutably.
    pub fn device_mut(&mut self) -> &mut GlesDevice<G> {
        &mut self.device
    }

    /// The settings the surface was created with.
    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    /// Returns `true` once the one-time initialization has run.
    pub fn is_ready(&self) -> bool {
        self.latch.is_ready()
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl<G: GlesApi> fmt::Debug for GlesSurface<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlesSurface")
            .field("device", &self.device)
            .field("settings", &self.settings)
            .field("latch", &self.latch.state())
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::gles::recording::{GlCall, RecordingGles};
    use std::cell::Cell;
    use vellum_core::renderer::GraphicsDevice;

    fn surface(settings: SurfaceSettings) -> GlesSurface<RecordingGles> {
        GlesSurface::new(RecordingGles::new(), settings, |_| Ok(())).unwrap()
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = SurfaceSettings {
            client_version: 3,
            ..Default::default()
        };
        assert!(GlesSurface::new(RecordingGles::new(), settings, |_| Ok(())).is_err());
    }

    #[test]
    fn initial_back_size_comes_from_settings() {
        let settings = SurfaceSettings {
            initial_width: 320,
            initial_height: 200,
            ..Default::default()
        };
        let surface = surface(settings);
        assert_eq!(surface.device().back_size(), (320, 200));
        assert!(surface.device().api().calls().is_empty());
    }

    #[test]
    fn surface_changed_sets_viewport_before_rendering() {
        let mut surface = GlesSurface::new(RecordingGles::new(), SurfaceSettings::default(), |d| {
            d.api().clear(0);
            Ok(())
        })
        .unwrap();
        surface.on_surface_changed(100, 50).unwrap();
        assert_eq!(
            surface.device().api().calls(),
            vec![GlCall::Viewport(0, 0, 100, 50), GlCall::Clear(0)]
        );
    }

    #[test]
    fn ready_runs_once_across_all_callbacks() {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let mut surface =
            surface(SurfaceSettings::default()).on_ready(move |_| counter.set(counter.get() + 1));

        assert!(!surface.is_ready());
        surface.on_surface_created().unwrap();
        surface.on_surface_changed(10, 10).unwrap();
        surface.on_draw_frame().unwrap();
        assert_eq!(runs.get(), 1);
        assert!(surface.is_ready());
        assert_eq!(surface.frame_count(), 3);
    }

    #[test]
    fn when_dirty_only_needs_frames_after_a_request() {
        let mut surface = surface(SurfaceSettings::default());
        assert!(!surface.needs_frame());
        let signal = surface.repaint_signal();
        signal.request();
        signal.request();
        assert!(surface.needs_frame());
        assert!(surface.wait_for_frame(Duration::from_millis(1)));
        surface.on_draw_frame().unwrap();
        assert!(!surface.needs_frame());
    }

    #[test]
    fn continuous_mode_always_needs_frames() {
        let surface = surface(SurfaceSettings {
            render_mode: RenderMode::Continuously,
            ..Default::default()
        });
        assert!(surface.needs_frame());
        assert!(surface.wait_for_frame(Duration::ZERO));
    }

    #[test]
    fn render_errors_propagate() {
        let mut surface = GlesSurface::new(RecordingGles::new(), SurfaceSettings::default(), |_| {
            Err(RenderError::InitializationFailed("boom".into()))
        })
        .unwrap();
        assert!(surface.on_draw_frame().is_err());
    }
}
