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

use byteorder::{ByteOrder, LittleEndian};
use polypng_common::*;

pub const EOCD_MAGIC: &[u8; 4] = &[0x50, 0x4B, 0x05, 0x06];
pub const CD_ENTRY_MAGIC: &[u8; 4] = &[0x50, 0x4B, 0x01, 0x02];

// Field positions are relative to the start of their record, signature included
pub const EOCD_FIXED_SIZE: usize = 22;
pub const EOCD_CD_SIZE_FIELD: usize = 12;
pub const EOCD_CD_START_FIELD: usize = 16;

pub const CD_ENTRY_FIXED_SIZE: usize = 46;
pub const CD_ENTRY_NAME_LENGTH_FIELD: usize = 28;
pub const CD_ENTRY_EXTRA_LENGTH_FIELD: usize = 30;
pub const CD_ENTRY_COMMENT_LENGTH_FIELD: usize = 32;
pub const CD_ENTRY_LOCAL_HEADER_FIELD: usize = 42;

// The real value is stored in a ZIP64 extra field instead
pub const ZIP64_SENTINEL: u32 = 0xFFFFFFFF;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipOffsets {
    // Central Directory (from start of file)
    pub cd_start: usize,
    // Combined length of every Central Directory entry
    pub cd_size: usize,
    // End of Central Directory (from start of file)
    pub eocd_start: usize
}

/// Position of the last End Of Central Directory signature in `buf`.
///
/// The last one wins because the EOCD may be followed by a comment of
/// arbitrary bytes, and readers scan backwards from the end of the file.
pub fn find_eocd(buf: &[u8]) -> Option<usize> {
    buf.windows(EOCD_MAGIC.len())
        .rposition(|magic| magic == EOCD_MAGIC)
}

pub fn find_offsets(zip_buf: &[u8]) -> Result<ZipOffsets> {
    let eocd_start = find_eocd(zip_buf).ok_or(PolyglotError::EndOfDirectoryNotFound)?;
    if zip_buf.len() - eocd_start < EOCD_FIXED_SIZE {
        return Err(PolyglotError::TruncatedEndOfDirectory);
    }
    let eocd = &zip_buf[eocd_start..(eocd_start + EOCD_FIXED_SIZE)];

    // The EOCD also tells us where the central directories start
    let cd_start = LittleEndian::read_u32(&eocd[EOCD_CD_START_FIELD..]);
    let cd_size = LittleEndian::read_u32(&eocd[EOCD_CD_SIZE_FIELD..]);
    if cd_start == ZIP64_SENTINEL || cd_size == ZIP64_SENTINEL {
        return Err(PolyglotError::Zip64NotSupported);
    }
    let cd_start = cd_start as usize;
    log::debug!("Found EOCD at 0x{eocd_start:X}, central directory at 0x{cd_start:X}");

    if cd_start >= eocd_start {
        return Err(PolyglotError::InvalidDirectoryOrder);
    }
    // Can't run off the end: the EOCD itself is at least 22 bytes further on
    if &zip_buf[cd_start..(cd_start + CD_ENTRY_MAGIC.len())] != CD_ENTRY_MAGIC {
        return Err(PolyglotError::CentralDirectorySignatureMismatch);
    }

    Ok(ZipOffsets {
        cd_start,
        cd_size: cd_size as usize,
        eocd_start
    })
}
