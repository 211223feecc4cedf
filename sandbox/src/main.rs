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

// Vellum Sandbox
// Drives a GLES surface headlessly: a worker thread requests frames and the
// main thread renders a textured quad into the call recorder.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use vellum_core::renderer::{
    Attribute, BlendFactors, Buffer, BufferKind, BufferMemory, DrawCommand, DrawType,
    GraphicsDevice, Program, RenderError, SurfaceSettings, Texture, TextureUnit, Uniform,
    UniformBindings, VarType, VertexLayout,
};
use vellum_core::{Bitmap32, Mat4, Rgba};
use vellum_infra::{GlesBuffer, GlesDevice, GlesSurface, GlesTexture, RecordingGles};

const FRAMES: u32 = 8;

const VERTEX_SHADER: &str = r#"
uniform mat4 u_ProjMat;
attribute vec2 a_Pos;
attribute vec4 a_Col;
attribute vec2 a_Tex;
varying vec4 v_Col;
varying vec2 v_Tex;
void main() {
    v_Col = a_Col;
    v_Tex = a_Tex;
    gl_Position = u_ProjMat * vec4(a_Pos, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform sampler2D u_Tex;
uniform float u_Alpha;
varying vec4 v_Col;
varying vec2 v_Tex;
void main() {
    vec4 color = texture2D(u_Tex, v_Tex) * v_Col;
    gl_FragColor = vec4(color.rgb, color.a * u_Alpha);
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    color: [u8; 4],
    uv: [f32; 2],
}

const VERTICES: &[Vertex] = &[
    Vertex { position: [0.0, 0.0], color: [255, 255, 255, 255], uv: [0.0, 0.0] },
    Vertex { position: [1.0, 0.0], color: [255, 0, 0, 255], uv: [1.0, 0.0] },
    Vertex { position: [0.0, 1.0], color: [0, 255, 0, 255], uv: [0.0, 1.0] },
    Vertex { position: [1.0, 1.0], color: [0, 0, 255, 255], uv: [1.0, 1.0] },
];

const INDICES: &[u16] = &[0, 1, 2, 2, 1, 3];

/// GPU resources of the demo, created on the render thread.
struct Scene {
    vertices: GlesBuffer<RecordingGles>,
    indices: GlesBuffer<RecordingGles>,
    texture: GlesTexture<RecordingGles>,
    program: Program,
    layout: VertexLayout,
}

impl Scene {
    fn new(device: &mut GlesDevice<RecordingGles>) -> Result<Self, RenderError> {
        log::info!("Sandbox: Creating scene resources...");

        let mut vertices = device.create_buffer(BufferKind::Vertex);
        vertices.upload(BufferMemory::from_pod(VERTICES));
        let mut indices = device.create_buffer(BufferKind::Index);
        indices.upload(BufferMemory::from_pod(INDICES));

        let mut texture = device.create_texture()?;
        texture.upload_bitmap32(&checkerboard(8, 8))?;
        texture.create_mipmaps();

        let layout = VertexLayout::new(vec![
            Attribute::new("a_Pos", VarType::Float2),
            Attribute::normalized("a_Col", VarType::Byte4),
            Attribute::new("a_Tex", VarType::Float2),
        ]);

        Ok(Self {
            vertices,
            indices,
            texture,
            program: Program::new("textured", VERTEX_SHADER, FRAGMENT_SHADER),
            layout,
        })
    }

    fn draw(
        &mut self,
        device: &mut GlesDevice<RecordingGles>,
        alpha: f32,
    ) -> Result<(), RenderError> {
        // The quad spans the unit square; map it onto the whole viewport.
        let projection = Mat4::orthographic(0.0, 1.0, 1.0, 0.0, -1.0, 1.0);

        let uniforms = UniformBindings::new()
            .with(Uniform::new("u_ProjMat", VarType::Mat4), projection)
            .with(
                Uniform::new("u_Tex", VarType::TextureUnit),
                TextureUnit::new(&self.texture, true),
            )
            .with(Uniform::new("u_Alpha", VarType::Float1), alpha);

        device.draw(DrawCommand {
            vertices: &mut self.vertices,
            indices: &mut self.indices,
            program: &self.program,
            draw_type: DrawType::Triangles,
            layout: &self.layout,
            vertex_count: INDICES.len() as i32,
            offset: 0,
            blending: BlendFactors::NORMAL,
            uniforms: &uniforms,
        })
    }
}

fn checkerboard(width: u32, height: u32) -> Bitmap32 {
    let mut bitmap = Bitmap32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let color = if (x + y) % 2 == 0 { Rgba::WHITE } else { Rgba::BLACK };
            bitmap.set(x, y, color);
        }
    }
    bitmap
}

fn load_settings() -> Result<SurfaceSettings> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings from {path}"))?;
            SurfaceSettings::from_json(&json).with_context(|| format!("invalid settings in {path}"))
        }
        None => Ok(SurfaceSettings::default()),
    }
}

/// Draws requested frames until `limit` frames were drawn or no request arrives
/// within `timeout`. Returns the number of frames drawn.
fn drive_frames(
    surface: &mut GlesSurface<RecordingGles>,
    limit: u32,
    timeout: Duration,
) -> Result<u32, RenderError> {
    let mut drawn = 0;
    while drawn < limit && surface.wait_for_frame(timeout) {
        surface.on_draw_frame()?;
        drawn += 1;
    }
    Ok(drawn)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = load_settings()?;
    let clear_color = settings.clear_color;
    let (width, height) = (settings.initial_width, settings.initial_height);

    let mut scene: Option<Scene> = None;
    let mut frame = 0u32;
    let mut surface = GlesSurface::new(RecordingGles::new(), settings, move |device| {
        device.clear(true, false, false, clear_color, 1.0, 0);
        if scene.is_none() {
            scene = Some(Scene::new(device)?);
        }
        frame += 1;
        match scene.as_mut() {
            Some(scene) => scene.draw(device, (frame as f32 / FRAMES as f32).min(1.0)),
            None => Ok(()),
        }
    })?
    .on_ready(|device| log::info!("Sandbox: {} backend ready.", device.backend_name()));

    surface.on_surface_created()?;
    surface.on_surface_changed(width, height)?;

    let repaint = surface.repaint_signal();
    let queue = surface.render_queue();
    let worker = thread::spawn(move || {
        for i in 0..FRAMES {
            if i == FRAMES / 2 {
                queue.submit(|device| {
                    log::info!(
                        "Sandbox: Job ran with {} cached programs.",
                        device.program_count()
                    );
                });
            }
            repaint.request();
            thread::sleep(Duration::from_millis(10));
        }
    });

    drive_frames(&mut surface, FRAMES, Duration::from_millis(200))?;
    worker.join().map_err(|_| anyhow::anyhow!("repaint worker panicked"))?;

    let calls = surface.device().api().calls();
    log::info!(
        "Sandbox: Rendered {} frames, {} GL calls recorded.",
        surface.frame_count(),
        calls.len()
    );
    Ok(())
}
