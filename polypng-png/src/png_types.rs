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

// Types and constants of the PNG container format
use deku::prelude::*;

pub const PNG_SIGNATURE: &[u8; 8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

// Signature followed by the length (13) and type of the IHDR chunk, which must come first
pub const PNG_HEAD_MAGIC: &[u8; 16] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52
];

pub const CHUNK_LENGTH_SIZE: usize = 4;
pub const CHUNK_TYPE_SIZE: usize = 4;
pub const CHUNK_CRC_SIZE: usize = 4;
pub const IHDR_DATA_SIZE: usize = 13;

/// Signature plus the whole IHDR chunk. Everything up to here is copied
/// verbatim ahead of the embedded chunk.
pub const PNG_HEAD_IHDR_SIZE: usize =
    PNG_SIGNATURE.len() + CHUNK_LENGTH_SIZE + CHUNK_TYPE_SIZE + IHDR_DATA_SIZE + CHUNK_CRC_SIZE;

/// Chunk lengths are unsigned but must not exceed `2^31 - 1`.
pub const MAX_CHUNK_DATA_SIZE: usize = 0x7FFFFFFF;

// Ancillary, private, reserved bit clear, safe to copy. Decoders skip it.
pub const ZIP_CHUNK_TYPE: &[u8; 4] = b"ziPc";

/// Where the data of a chunk placed straight after IHDR begins in the file.
pub const EMBEDDED_DATA_OFFSET: usize = PNG_HEAD_IHDR_SIZE + CHUNK_LENGTH_SIZE + CHUNK_TYPE_SIZE;

// Everything before the chunk data. The CRC follows the data separately.
#[derive(Debug, PartialEq, DekuWrite, Clone)]
#[deku(endian = "big")]
pub struct ChunkHeader {
    // Length of the data only, not the type or CRC
    pub length: u32,
    pub chunk_type: [u8; 4]
}
