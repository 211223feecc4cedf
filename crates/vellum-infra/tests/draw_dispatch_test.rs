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

use std::rc::Rc;

use vellum_core::renderer::{
    Attribute, BlendFactors, Buffer, BufferKind, BufferMemory, DrawCommand, DrawType,
    GraphicsDevice, Program, RenderError, ResourceError, ShaderError, Texture, TextureUnit,
    Uniform, UniformBindings, VarType, VertexLayout,
};
use vellum_core::{Bitmap32, Mat4, Rgba};
use vellum_infra::graphics::gles::{
    frame_channel, GlCall, GlesBuffer, GlesDevice, GlesTexture, RecordingGles,
};

const VS: &str = "attribute vec2 a_Pos; attribute vec4 a_Col; attribute vec2 a_Tex;\n\
                  uniform mat4 u_ProjMat;\n\
                  void main() { gl_Position = u_ProjMat * vec4(a_Pos, 0.0, 1.0); }";
const FS: &str = "uniform sampler2D u_Tex; uniform float u_Alpha;\n\
                  void main() { gl_FragColor = texture2D(u_Tex, vec2(0.0)) * u_Alpha; }";

// --- Test Setup ---

struct Fixture {
    gl: Rc<RecordingGles>,
    device: GlesDevice<RecordingGles>,
    vertices: GlesBuffer<RecordingGles>,
    indices: GlesBuffer<RecordingGles>,
    program: Program,
    layout: VertexLayout,
}

fn fixture() -> Fixture {
    let gl = Rc::new(RecordingGles::new());
    let (signal, _frames) = frame_channel();
    let mut device = GlesDevice::new(gl.clone(), signal);

    let mut vertices = device.create_buffer(BufferKind::Vertex);
    vertices.upload(BufferMemory::new(vec![0; 4 * 20]));
    let mut indices = device.create_buffer(BufferKind::Index);
    indices.upload(BufferMemory::from_pod(&[0u16, 1, 2, 2, 1, 3]));

    Fixture {
        gl,
        device,
        vertices,
        indices,
        program: Program::new("textured", VS, FS),
        layout: VertexLayout::new(vec![
            Attribute::new("a_Pos", VarType::Float2),
            Attribute::normalized("a_Col", VarType::Byte4),
            Attribute::new("a_Tex", VarType::Float2),
        ]),
    }
}

impl Fixture {
    fn draw(
        &mut self,
        draw_type: DrawType,
        blending: BlendFactors,
        uniforms: &UniformBindings<'_, GlesTexture<RecordingGles>>,
    ) -> Result<(), RenderError> {
        self.device.draw(DrawCommand {
            vertices: &mut self.vertices,
            indices: &mut self.indices,
            program: &self.program,
            draw_type,
            layout: &self.layout,
            vertex_count: 6,
            offset: 0,
            blending,
            uniforms,
        })
    }
}

fn position(calls: &[GlCall], call: &GlCall) -> usize {
    calls
        .iter()
        .position(|c| c == call)
        .unwrap_or_else(|| panic!("{call:?} was not issued"))
}

// --- Tests ---

#[test]
fn test_full_draw_translates_every_input() -> anyhow::Result<()> {
    let mut f = fixture();
    let mut texture = f.device.create_texture()?;
    texture.upload_bitmap32(&Bitmap32::filled(2, 2, Rgba::WHITE))?;
    let texture_id = texture.native_handle().unwrap_or_default();
    let projection = Mat4::orthographic(0.0, 640.0, 480.0, 0.0, -1.0, 1.0);

    let uniforms = UniformBindings::new()
        .with(Uniform::new("u_ProjMat", VarType::Mat4), projection)
        .with(
            Uniform::new("u_Tex", VarType::TextureUnit),
            TextureUnit::new(&texture, true),
        )
        .with(Uniform::new("u_Alpha", VarType::Float1), 0.5f64);
    f.gl.take_calls();

    f.draw(DrawType::Triangles, BlendFactors::NORMAL, &uniforms)?;
    let calls = f.gl.calls();

    // Buffers are bound vertex first, then index, then the program is used.
    let bind_vb = calls
        .iter()
        .position(|c| matches!(c, GlCall::BindBuffer { target, .. } if *target == glow::ARRAY_BUFFER))
        .expect("vertex buffer bound");
    let bind_ib = calls
        .iter()
        .position(|c| {
            matches!(c, GlCall::BindBuffer { target, .. } if *target == glow::ELEMENT_ARRAY_BUFFER)
        })
        .expect("index buffer bound");
    let use_program = calls
        .iter()
        .position(|c| matches!(c, GlCall::UseProgram(id) if *id != 0))
        .expect("program used");
    assert!(bind_vb < bind_ib && bind_ib < use_program);

    // Attribute pointers: element count, type, normalization, stride and offset.
    let pointers: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            GlCall::VertexAttribPointer {
                size,
                ty,
                normalized,
                stride,
                offset,
                ..
            } => Some((*size, *ty, *normalized, *stride, *offset)),
            _ => None,
        })
        .collect();
    assert_eq!(
        pointers,
        vec![
            (2, glow::FLOAT, false, 20, 0),
            (4, glow::UNSIGNED_BYTE, true, 20, 8),
            (2, glow::FLOAT, false, 20, 12),
        ]
    );

    // Uniforms, in insertion order.
    let matrix = calls
        .iter()
        .find_map(|c| match c {
            GlCall::UniformMatrix4 {
                transpose, value, ..
            } => Some((*transpose, *value)),
            _ => None,
        })
        .expect("matrix uploaded");
    assert_eq!(matrix, (false, projection.to_cols_array()));

    let activate_unit0 = position(&calls, &GlCall::ActiveTexture(glow::TEXTURE0));
    let bind_texture = position(
        &calls,
        &GlCall::BindTexture {
            target: glow::TEXTURE_2D,
            texture: texture_id,
        },
    );
    assert!(activate_unit0 < bind_texture);
    assert_eq!(
        f.gl.count(|c| matches!(c, GlCall::Uniform1i(_, 0))),
        1,
        "sampler bound to unit 0"
    );
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::Uniform1f(_, v) if *v == 0.5)), 1);

    // Blending and the draw itself.
    let blend = position(
        &calls,
        &GlCall::BlendFuncSeparate(
            glow::SRC_ALPHA,
            glow::ONE_MINUS_SRC_ALPHA,
            glow::ONE,
            glow::ONE_MINUS_SRC_ALPHA,
        ),
    );
    assert!(position(&calls, &GlCall::Enable(glow::BLEND)) < blend);
    let draw = position(
        &calls,
        &GlCall::DrawElements {
            mode: glow::TRIANGLES,
            count: 6,
            element_type: glow::UNSIGNED_SHORT,
            offset: 0,
        },
    );

    // Cleanup: unit 0 reactivated, every enabled attribute disabled.
    let tail = &calls[draw + 1..];
    assert_eq!(tail[0], GlCall::ActiveTexture(glow::TEXTURE0));
    assert_eq!(
        tail[1..]
            .iter()
            .filter(|c| matches!(c, GlCall::DisableVertexAttribArray(_)))
            .count(),
        3
    );
    Ok(())
}

#[test]
fn test_draw_without_uniforms_performs_no_uniform_work() -> anyhow::Result<()> {
    let mut f = fixture();
    let uniforms = UniformBindings::new();
    f.draw(DrawType::Triangles, BlendFactors::DISABLED, &uniforms)?;

    assert_eq!(f.gl.count(|c| matches!(c, GlCall::UniformLocation { .. })), 0);
    assert_eq!(
        f.gl.count(|c| matches!(c, GlCall::ActiveTexture(_))),
        1,
        "only the baseline reset to unit 0"
    );
    assert_eq!(f.gl.count(|c| *c == GlCall::Disable(glow::BLEND)), 1);
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::BlendFuncSeparate(..))), 0);
    Ok(())
}

#[test]
fn test_inactive_attributes_are_skipped_not_errors() -> anyhow::Result<()> {
    let mut f = fixture();
    f.gl.set_inactive("a_Col");
    f.draw(DrawType::TriangleStrip, BlendFactors::DISABLED, &UniformBindings::new())?;

    assert_eq!(f.gl.count(|c| matches!(c, GlCall::EnableVertexAttribArray(_))), 2);
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::DisableVertexAttribArray(_))), 2);
    assert_eq!(
        f.gl.count(|c| matches!(c, GlCall::VertexAttribPointer { offset: 8, .. })),
        0
    );
    assert_eq!(
        f.gl.count(|c| matches!(c, GlCall::DrawElements { mode, .. } if *mode == glow::TRIANGLE_STRIP)),
        1
    );
    Ok(())
}

#[test]
fn test_texture_units_advance_even_without_a_texture() -> anyhow::Result<()> {
    let mut f = fixture();
    let texture = f.device.create_texture()?;
    let uniforms = UniformBindings::new()
        .with(
            Uniform::new("u_Empty", VarType::TextureUnit),
            TextureUnit::empty(false),
        )
        .with(
            Uniform::new("u_Tex", VarType::TextureUnit),
            TextureUnit::new(&texture, false),
        );
    f.gl.take_calls();

    f.draw(DrawType::Triangles, BlendFactors::DISABLED, &uniforms)?;

    assert_eq!(f.gl.count(|c| *c == GlCall::ActiveTexture(glow::TEXTURE0 + 1)), 1);
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::Uniform1i(_, 0))), 1);
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::Uniform1i(_, 1))), 1);
    assert_eq!(
        f.gl.count(|c| matches!(c, GlCall::BindTexture { .. })),
        1,
        "only the unit with a texture binds one"
    );
    assert_eq!(
        f.gl.count(|c| matches!(
            c,
            GlCall::TexParameter { parameter, value, .. }
                if *parameter == glow::TEXTURE_MAG_FILTER && *value == glow::NEAREST as i32
        )),
        1
    );
    Ok(())
}

#[test]
fn test_unsupported_and_mismatched_uniforms_fail() {
    let mut f = fixture();

    let unsupported =
        UniformBindings::new().with(Uniform::new("u_Color", VarType::Float4), 1.0f64);
    assert_eq!(
        f.draw(DrawType::Triangles, BlendFactors::DISABLED, &unsupported),
        Err(RenderError::UnsupportedUniformType(VarType::Float4))
    );

    let mismatched =
        UniformBindings::new().with(Uniform::new("u_Alpha", VarType::Float1), Mat4::IDENTITY);
    assert_eq!(
        f.draw(DrawType::Triangles, BlendFactors::DISABLED, &mismatched),
        Err(RenderError::UniformValueMismatch {
            uniform: "u_Alpha".to_string(),
            expected: VarType::Float1,
        })
    );
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::DrawElements { .. })), 0);
}

#[test]
fn test_swapped_buffers_are_rejected_before_any_native_call() {
    let mut f = fixture();
    f.gl.take_calls();
    let uniforms = UniformBindings::new();
    let result = f.device.draw(DrawCommand {
        vertices: &mut f.indices,
        indices: &mut f.vertices,
        program: &f.program,
        draw_type: DrawType::Triangles,
        layout: &f.layout,
        vertex_count: 6,
        offset: 0,
        blending: BlendFactors::DISABLED,
        uniforms: &uniforms,
    });
    assert_eq!(
        result,
        Err(RenderError::BufferKindMismatch {
            expected: BufferKind::Vertex,
            actual: BufferKind::Index,
        })
    );
    assert!(f.gl.calls().is_empty());
}

#[test]
fn test_compile_failure_surfaces_the_source_verbatim() {
    let mut f = fixture();
    f.gl.set_compile_failure_marker(Some("texture2D"));
    let err = f
        .draw(DrawType::Triangles, BlendFactors::DISABLED, &UniformBindings::new())
        .unwrap_err();

    match err {
        RenderError::Resource(ResourceError::Shader(ShaderError::Compile { source, log, .. })) => {
            assert_eq!(source, FS);
            assert!(!log.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(f.device.program_count(), 0);
    assert_eq!(f.gl.live_programs(), 0);
    assert_eq!(f.gl.live_shaders(), 0);
}

#[test]
fn test_program_is_compiled_once_across_draws() -> anyhow::Result<()> {
    let mut f = fixture();
    f.draw(DrawType::Triangles, BlendFactors::DISABLED, &UniformBindings::new())?;
    f.draw(DrawType::Triangles, BlendFactors::ADD, &UniformBindings::new())?;

    assert_eq!(f.gl.count(|c| matches!(c, GlCall::CreateProgram(_))), 1);
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::DrawElements { .. })), 2);
    // Buffer memory only reaches the device on the first draw.
    assert_eq!(f.gl.count(|c| matches!(c, GlCall::BufferData { .. })), 2);
    assert!(!f.vertices.is_dirty() && !f.indices.is_dirty());
    Ok(())
}
