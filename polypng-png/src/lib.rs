// Copyright 2024 Google LLC
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

//! PNG framing: the fixed head every PNG starts with, and the
//! length/type/CRC wrapping of a chunk.

pub mod chunk;
pub mod png_types;
pub mod validator;

pub use chunk::{chunk_crc, chunk_header};
pub use validator::validate_png_head;
