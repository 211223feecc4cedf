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

//! # Vellum Core
//!
//! Foundational crate containing the abstract graphics-device contracts, the
//! resource base types shared by every backend and the rendering error hierarchy.
//!
//! Backends (see `vellum-infra`) implement the traits in [`renderer::traits`];
//! upper layers only ever talk to those traits.

#![warn(missing_docs)]

pub mod image;
pub mod math;
pub mod renderer;

pub use image::{Bitmap32, Bitmap8, BitmapError};
pub use math::{Mat4, Rgba};
