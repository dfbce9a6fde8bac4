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

use polypng_common::*;

use crate::png_types::{PNG_HEAD_IHDR_SIZE, PNG_HEAD_MAGIC};

/// Checks the buffer starts with the PNG signature and a complete IHDR chunk.
///
/// The IHDR data and CRC are copied as-is and never inspected.
pub fn validate_png_head(png_buf: &[u8]) -> Result<()> {
    if !png_buf.starts_with(PNG_HEAD_MAGIC) {
        return Err(PolyglotError::InvalidHeader);
    }
    if png_buf.len() < PNG_HEAD_IHDR_SIZE {
        log::debug!("PNG is only {} bytes, IHDR is incomplete", png_buf.len());
        return Err(PolyglotError::InvalidHeader);
    }
    Ok(())
}
