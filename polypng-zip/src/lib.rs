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

use offset_patcher::patch_offsets;
use polypng_common::Result;
use zip_parser::{find_eocd, find_offsets};

mod offset_patcher;
pub mod zip_parser;

/// Returns a copy of a ZIP file buffer whose central directory offsets all
/// point `correction` bytes further into the file, ready to be stored after
/// that many bytes of something else.
///
/// The input buffer is left untouched.
pub fn relocate_zip_buffer(zip_buf: &[u8], correction: u32) -> Result<Vec<u8>> {
    // Read ZIP file to find central directory
    let offsets = find_offsets(zip_buf)?;
    // The caller's buffer is never written to
    let mut relocated = zip_buf.to_vec();
    patch_offsets(&mut relocated, &offsets, correction)?;
    Ok(relocated)
}

/// Whether `buf` contains the ZIP End Of Central Directory signature anywhere.
pub fn contains_eocd_magic(buf: &[u8]) -> bool {
    find_eocd(buf).is_some()
}
