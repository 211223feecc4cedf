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

use vellum_core::image::{Bitmap32, Bitmap8};
use vellum_core::renderer::{ResourceError, Texture, TextureKind};

use super::api::GlesApi;
use super::conversions::{mag_filter, min_filter, IntoGl};

/// A GLES 2D texture. The native object exists from construction until
/// [`Texture::close`] or drop.
pub struct GlesTexture<G: GlesApi> {
    gl: Rc<G>,
    handle: Option<u32>,
    mipmaps: bool,
}

impl<G: GlesApi> GlesTexture<G> {
    pub(crate) fn new(gl: Rc<G>) -> Result<Self, ResourceError> {
        let handle = gl
            .create_texture()
            .map_err(ResourceError::AllocationFailed)?;
        log::debug!("GlesTexture: Allocated texture {handle}.");
        Ok(Self {
            gl,
            handle: Some(handle),
            mipmaps: false,
        })
    }

    /// The native texture name, or `None` once closed.
    pub fn native_handle(&self) -> Option<u32> {
        self.handle
    }

    /// Binds the texture to `TEXTURE_2D`.
    pub fn bind(&self) {
        self.gl
            .bind_texture(glow::TEXTURE_2D, self.handle.unwrap_or(0));
    }

    /// Unbinds whatever texture is bound to `TEXTURE_2D`.
    pub fn unbind(&self) {
        self.gl.bind_texture(glow::TEXTURE_2D, 0);
    }

    fn upload(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        kind: TextureKind,
    ) -> Result<(), ResourceError> {
        let handle = self.handle.ok_or(ResourceError::InvalidHandle)?;
        let format = kind.into_gl();
        self.gl.bind_texture(glow::TEXTURE_2D, handle);
        self.gl.tex_image_2d(
            glow::TEXTURE_2D,
            format as i32,
            width as i32,
            height as i32,
            format,
            glow::UNSIGNED_BYTE,
            pixels,
        );
        log::trace!("GlesTexture: Uploaded {width}x{height} {kind:?} image to texture {handle}.");
        Ok(())
    }

    fn apply_wrap(&self) {
        self.gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        self.gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
    }
}

impl<G: GlesApi> Texture for GlesTexture<G> {
    fn mipmaps(&self) -> bool {
        self.mipmaps
    }

    fn set_mipmaps(&mut self, mipmaps: bool) {
        self.mipmaps = mipmaps;
    }

    fn upload_bitmap32(&mut self, bitmap: &Bitmap32) -> Result<(), ResourceError> {
        let pixels: &[u8] = bytemuck::cast_slice(bitmap.pixels());
        self.upload(pixels, bitmap.width(), bitmap.height(), TextureKind::Rgba)
    }

    fn upload_bitmap8(&mut self, bitmap: &Bitmap8) -> Result<(), ResourceError> {
        self.upload(
            bitmap.pixels(),
            bitmap.width(),
            bitmap.height(),
            TextureKind::Luminance,
        )
    }

    fn upload_buffer(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        kind: TextureKind,
    ) -> Result<(), ResourceError> {
        let expected = kind.image_size(width, height);
        if data.len() < expected {
            return Err(ResourceError::OutOfBounds {
                expected,
                actual: data.len(),
            });
        }
        self.upload(&data[..expected], width, height, kind)
    }

    fn create_mipmaps(&mut self) -> bool {
        // Mipmap generation is not wired up; callers must fall back to single-level sampling.
        self.bind();
        self.set_filter(true);
        false
    }

    fn set_filter(&self, linear: bool) {
        self.gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            min_filter(self.mipmaps, linear) as i32,
        );
        self.gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            mag_filter(linear) as i32,
        );
        self.apply_wrap();
    }

    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.gl.delete_texture(handle);
            log::debug!("GlesTexture: Deleted texture {handle}.");
        }
    }
}

impl<G: GlesApi> Drop for GlesTexture<G> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<G: GlesApi> fmt::Debug for GlesTexture<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlesTexture")
            .field("handle", &self.handle)
            .field("mipmaps", &self.mipmaps)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::gles::conversions::LUMINANCE;
    use crate::graphics::gles::recording::{GlCall, RecordingGles};
    use vellum_core::Rgba;

    fn texture() -> (Rc<RecordingGles>, GlesTexture<RecordingGles>) {
        let gl = Rc::new(RecordingGles::new());
        let tex = GlesTexture::new(gl.clone()).unwrap();
        (gl, tex)
    }

    fn tex_images(gl: &RecordingGles) -> Vec<(u32, usize)> {
        gl.calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::TexImage2D { format, pixels, .. } => Some((format, pixels.len())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn texture_is_allocated_eagerly() {
        let (gl, tex) = texture();
        assert!(tex.native_handle().is_some());
        assert_eq!(gl.live_textures(), 1);
    }

    #[test]
    fn bitmap8_uploads_w_times_h_luminance_bytes() {
        let (gl, mut tex) = texture();
        tex.upload_bitmap8(&Bitmap8::new(5, 3)).unwrap();
        assert_eq!(tex_images(&gl), vec![(LUMINANCE, 15)]);
    }

    #[test]
    fn bitmap32_uploads_w_times_h_times_4_rgba_bytes() {
        let (gl, mut tex) = texture();
        let bitmap = Bitmap32::filled(5, 3, Rgba::new(1, 2, 3, 4));
        tex.upload_bitmap32(&bitmap).unwrap();
        assert_eq!(tex_images(&gl), vec![(glow::RGBA, 60)]);

        let calls = gl.calls();
        let first_pixel = calls.iter().find_map(|c| match c {
            GlCall::TexImage2D { pixels, .. } => Some(pixels[..4].to_vec()),
            _ => None,
        });
        assert_eq!(first_pixel, Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn upload_buffer_checks_the_size() {
        let (gl, mut tex) = texture();
        let err = tex
            .upload_buffer(&[0; 7], 2, 1, TextureKind::Rgba)
            .unwrap_err();
        assert_eq!(
            err,
            ResourceError::OutOfBounds {
                expected: 8,
                actual: 7
            }
        );
        tex.upload_buffer(&[0; 10], 2, 1, TextureKind::Rgba).unwrap();
        assert_eq!(tex_images(&gl), vec![(glow::RGBA, 8)]);
    }

    #[test]
    fn create_mipmaps_reports_false_and_forces_linear_clamp() {
        let (gl, mut tex) = texture();
        assert!(!tex.create_mipmaps());
        let params: Vec<_> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::TexParameter {
                    parameter, value, ..
                } => Some((parameter, value as u32)),
                _ => None,
            })
            .collect();
        assert!(params.contains(&(glow::TEXTURE_MIN_FILTER, glow::LINEAR)));
        assert!(params.contains(&(glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE)));
        assert!(params.contains(&(glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE)));
    }

    #[test]
    fn create_mipmaps_goes_through_the_mipmap_aware_filter() {
        let (gl, mut tex) = texture();
        tex.set_mipmaps(true);
        assert!(!tex.create_mipmaps());
        let min_filters: Vec<_> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::TexParameter {
                    parameter, value, ..
                } if parameter == glow::TEXTURE_MIN_FILTER => Some(value as u32),
                _ => None,
            })
            .collect();
        assert_eq!(min_filters, vec![glow::LINEAR_MIPMAP_NEAREST]);
        assert_eq!(
            gl.count(|c| matches!(c, GlCall::BindTexture { target, .. } if *target == glow::TEXTURE_2D)),
            1
        );
    }

    #[test]
    fn set_filter_honors_mipmaps_and_reapplies_wrap() {
        let (gl, mut tex) = texture();
        tex.set_mipmaps(true);
        tex.set_filter(false);
        let calls = gl.take_calls();
        assert!(calls.contains(&GlCall::TexParameter {
            target: glow::TEXTURE_2D,
            parameter: glow::TEXTURE_MIN_FILTER,
            value: glow::NEAREST_MIPMAP_NEAREST as i32,
        }));
        assert!(calls.contains(&GlCall::TexParameter {
            target: glow::TEXTURE_2D,
            parameter: glow::TEXTURE_MAG_FILTER,
            value: glow::NEAREST as i32,
        }));

        tex.set_filter(true);
        assert_eq!(
            gl.count(|c| matches!(c, GlCall::TexParameter { parameter, .. } if *parameter == glow::TEXTURE_WRAP_S)),
            1
        );
    }

    #[test]
    fn upload_after_close_is_rejected() {
        let (gl, mut tex) = texture();
        tex.close();
        tex.close();
        assert_eq!(gl.live_textures(), 0);
        assert_eq!(
            tex.upload_bitmap8(&Bitmap8::new(1, 1)),
            Err(ResourceError::InvalidHandle)
        );
    }
}
