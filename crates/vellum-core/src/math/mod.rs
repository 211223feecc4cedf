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

//! Storage types for the values the rendering contracts exchange.
//!
//! Only what the graphics contracts need lives here: a column-major 4x4 matrix
//! used for uniform uploads and a packed 32-bit color used by bitmaps and clears.
//! Matrix arithmetic belongs to the engine layers above.

pub mod color;
pub mod matrix;

pub use self::color::Rgba;
pub use self::matrix::Mat4;
