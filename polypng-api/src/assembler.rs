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
use polypng_png::{
    chunk_crc, chunk_header,
    png_types::{CHUNK_CRC_SIZE, PNG_HEAD_IHDR_SIZE, ZIP_CHUNK_TYPE}
};

/// Lays out the final file:
///
///  1. PNG signature and IHDR chunk, copied from the image
///  2. Length and type of the chunk holding the archive
///  3. The (already relocated) archive
///  4. CRC of that chunk
///  5. The rest of the image, from the chunk after IHDR onwards
pub fn assemble_polyglot(png_buf: &[u8], relocated_zip: &[u8]) -> Result<Vec<u8>> {
    let (png_head, png_tail) = png_buf.split_at(PNG_HEAD_IHDR_SIZE);
    let header = chunk_header(ZIP_CHUNK_TYPE, relocated_zip)?;
    let crc = chunk_crc(ZIP_CHUNK_TYPE, relocated_zip);
    log::debug!(
        "Embedding {} byte archive with CRC 0x{crc:08X}",
        relocated_zip.len()
    );

    let mut polyglot =
        Vec::with_capacity(png_buf.len() + header.len() + relocated_zip.len() + CHUNK_CRC_SIZE);
    polyglot.extend(png_head);
    polyglot.extend(&header);
    polyglot.extend(relocated_zip);
    polyglot.extend(crc.to_be_bytes());
    polyglot.extend(png_tail);

    Ok(polyglot)
}
