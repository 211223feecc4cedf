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

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use vellum_core::renderer::{GraphicsDevice, RenderMode, SurfaceSettings};
use vellum_core::Rgba;
use vellum_infra::graphics::gles::{GlCall, GlesSurface, RecordingGles};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn surface_with_log() -> (GlesSurface<RecordingGles>, Rc<RefCell<Vec<String>>>) {
    init_logging();
    let log = Rc::new(RefCell::new(Vec::new()));
    let render_log = log.clone();
    let ready_log = log.clone();
    let surface = GlesSurface::new(RecordingGles::new(), SurfaceSettings::default(), move |_| {
        render_log.borrow_mut().push("render".to_string());
        Ok(())
    })
    .expect("default settings are valid")
    .on_ready(move |_| ready_log.borrow_mut().push("ready".to_string()));
    (surface, log)
}

#[test]
fn test_initialization_runs_once_before_the_first_render() {
    let (mut surface, log) = surface_with_log();
    surface.on_surface_created().unwrap();
    surface.on_surface_changed(320, 240).unwrap();
    surface.on_draw_frame().unwrap();
    surface.on_draw_frame().unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["ready", "render", "render", "render", "render"]
    );
}

#[test]
fn test_first_callback_can_be_a_size_change() {
    let (mut surface, log) = surface_with_log();
    surface.on_surface_changed(64, 32).unwrap();

    assert_eq!(*log.borrow(), vec!["ready", "render"]);
    assert_eq!(surface.device().back_size(), (64, 32));
    assert_eq!(
        surface.device().api().calls().first(),
        Some(&GlCall::Viewport(0, 0, 64, 32))
    );
}

#[test]
fn test_repaint_from_many_threads_coalesces_into_one_frame() {
    let (mut surface, _log) = surface_with_log();
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let signal = surface.repaint_signal();
            thread::spawn(move || {
                for _ in 0..100 {
                    signal.request();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert!(surface.needs_frame());
    surface.on_draw_frame().unwrap();
    assert!(!surface.needs_frame(), "one frame answers every request");
}

#[test]
fn test_device_repaint_requests_a_frame() {
    let (surface, _log) = surface_with_log();
    assert!(!surface.needs_frame());
    surface.device().repaint();
    assert!(surface.needs_frame());
}

#[test]
fn test_queued_jobs_run_in_order_on_the_next_frame() {
    let (mut surface, log) = surface_with_log();
    let queue = surface.render_queue();

    let producer = thread::spawn(move || {
        for i in 0..3u8 {
            queue.submit(move |device| {
                device.clear(true, false, false, Rgba::new(i, 0, 0, 255), 1.0, 0);
            });
        }
    });
    producer.join().unwrap();

    assert!(surface.wait_for_frame(Duration::from_secs(5)));
    surface.on_draw_frame().unwrap();

    let reds: Vec<u8> = surface
        .device()
        .api()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            GlCall::ClearColor(r, ..) => Some((r * 255.0).round() as u8),
            _ => None,
        })
        .collect();
    assert_eq!(reds, vec![0, 1, 2]);
    assert_eq!(*log.borrow(), vec!["ready", "render"]);
    assert!(!surface.needs_frame());
}

#[test]
fn test_submitting_after_the_surface_is_gone_reports_failure() {
    let (surface, _log) = surface_with_log();
    let queue = surface.render_queue();
    drop(surface);
    assert!(!queue.submit(|_| {}));
}

#[test]
fn test_settings_loaded_from_json_drive_the_surface() {
    let settings = SurfaceSettings::from_json(
        r#"{ "render_mode": "Continuously", "initial_width": 1280, "initial_height": 720 }"#,
    )
    .unwrap();
    let surface = GlesSurface::new(RecordingGles::new(), settings, |_| Ok(())).unwrap();

    assert_eq!(surface.settings().render_mode, RenderMode::Continuously);
    assert_eq!(surface.device().back_size(), (1280, 720));
    assert!(surface.needs_frame());
}
