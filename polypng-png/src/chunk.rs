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

use deku::DekuContainerWrite;
use polypng_common::*;

use crate::png_types::{ChunkHeader, MAX_CHUNK_DATA_SIZE};

/// CRC-32 of a chunk as PNG defines it: over the type and data, but not the
/// length field.
pub fn chunk_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    hasher.finalize()
}

/// Serialised length and type that go in front of `data`.
pub fn chunk_header(chunk_type: &[u8; 4], data: &[u8]) -> Result<Vec<u8>> {
    let header = ChunkHeader {
        length: chunk_length(data.len())?,
        chunk_type: *chunk_type
    };
    Ok(header.to_bytes()?)
}

// Value of the length field for `len` bytes of chunk data
fn chunk_length(len: usize) -> Result<u32> {
    if len > MAX_CHUNK_DATA_SIZE {
        return Err(PolyglotError::ArchiveTooLarge);
    }
    Ok(len as u32)
}
