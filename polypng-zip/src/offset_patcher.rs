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

use crate::zip_parser::*;

/// Shifts every absolute offset in the central directory and its end record
/// by `correction` bytes, in place.
///
/// Walks entries from `cd_start` until exactly `cd_size` bytes have been
/// covered. Entries are trusted for their sizes only as far as they stay
/// inside the directory: anything reaching past the declared size or into the
/// EOCD is reported rather than followed.
pub fn patch_offsets(zip_buf: &mut [u8], offsets: &ZipOffsets, correction: u32) -> Result<()> {
    let mut traversed = 0;
    while traversed < offsets.cd_size {
        let entry_start = offsets.cd_start + traversed;
        let fixed_end = entry_start + CD_ENTRY_FIXED_SIZE;
        if fixed_end > offsets.eocd_start {
            return Err(PolyglotError::CentralDirectoryOverrun);
        }
        let entry = &mut zip_buf[entry_start..fixed_end];
        if &entry[..CD_ENTRY_MAGIC.len()] != CD_ENTRY_MAGIC {
            return Err(PolyglotError::CentralDirectorySignatureMismatch);
        }

        let local_header_field =
            &mut entry[CD_ENTRY_LOCAL_HEADER_FIELD..(CD_ENTRY_LOCAL_HEADER_FIELD + 4)];
        let local_header = relocate_field(local_header_field, correction)?;
        log::trace!("Central directory entry at 0x{entry_start:X} now points at 0x{local_header:X}");

        let entry_size = CD_ENTRY_FIXED_SIZE
            + LittleEndian::read_u16(&entry[CD_ENTRY_NAME_LENGTH_FIELD..]) as usize
            + LittleEndian::read_u16(&entry[CD_ENTRY_EXTRA_LENGTH_FIELD..]) as usize
            + LittleEndian::read_u16(&entry[CD_ENTRY_COMMENT_LENGTH_FIELD..]) as usize;
        if traversed + entry_size > offsets.cd_size
            || entry_start + entry_size > offsets.eocd_start
        {
            return Err(PolyglotError::CentralDirectoryOverrun);
        }
        traversed += entry_size;
    }

    let cd_start_field_pos = offsets.eocd_start + EOCD_CD_START_FIELD;
    let cd_start_field = &mut zip_buf[cd_start_field_pos..(cd_start_field_pos + 4)];
    let cd_start = relocate_field(cd_start_field, correction)?;
    log::debug!("Relocated central directory to 0x{cd_start:X}");

    Ok(())
}

// Rewrites one little-endian u32 offset, returning the new value
fn relocate_field(field: &mut [u8], correction: u32) -> Result<u32> {
    let offset = LittleEndian::read_u32(field);
    if offset == ZIP64_SENTINEL {
        return Err(PolyglotError::Zip64NotSupported);
    }
    let relocated = offset
        .checked_add(correction)
        .ok_or(PolyglotError::OffsetOverflow)?;
    LittleEndian::write_u32(field, relocated);
    Ok(relocated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip_parser::tests::{build_zip, write_u32};
    use pretty_assertions::assert_eq;

    const CORRECTION: u32 = 41;

    // Start of every central directory entry, read from the untouched archive
    fn entry_starts(zip_buf: &[u8], offsets: &ZipOffsets) -> Vec<usize> {
        let mut starts = vec![];
        let mut pos = offsets.cd_start;
        while pos < offsets.cd_start + offsets.cd_size {
            starts.push(pos);
            pos += CD_ENTRY_FIXED_SIZE
                + LittleEndian::read_u16(&zip_buf[(pos + CD_ENTRY_NAME_LENGTH_FIELD)..]) as usize
                + LittleEndian::read_u16(&zip_buf[(pos + CD_ENTRY_EXTRA_LENGTH_FIELD)..]) as usize
                + LittleEndian::read_u16(&zip_buf[(pos + CD_ENTRY_COMMENT_LENGTH_FIELD)..])
                    as usize;
        }
        starts
    }

    fn read_u32(buf: &[u8], pos: usize) -> u32 {
        LittleEndian::read_u32(&buf[pos..])
    }

    #[test]
    fn shifts_every_offset_and_nothing_else() {
        let original = build_zip(
            &[("first.txt", "one"), ("second.txt", "two two"), ("third.txt", "3")],
            "trailing"
        );
        let offsets = find_offsets(&original).unwrap();
        let starts = entry_starts(&original, &offsets);
        assert_eq!(starts.len(), 3);

        // Apply the expected edits by hand, then compare whole buffers
        let mut expected = original.clone();
        for start in &starts {
            let field = start + CD_ENTRY_LOCAL_HEADER_FIELD;
            write_u32(&mut expected, field, read_u32(&original, field) + CORRECTION);
        }
        let eocd_field = offsets.eocd_start + EOCD_CD_START_FIELD;
        write_u32(
            &mut expected,
            eocd_field,
            offsets.cd_start as u32 + CORRECTION
        );

        let mut patched = original.clone();
        patch_offsets(&mut patched, &offsets, CORRECTION).unwrap();

        assert_eq!(patched, expected);
    }

    #[test]
    fn zero_length_directory_only_moves_end_record() {
        let mut zip_buf = build_zip(&[("hello.txt", "hello world")], "");
        let mut offsets = find_offsets(&zip_buf).unwrap();
        offsets.cd_size = 0;
        let local_field = offsets.cd_start + CD_ENTRY_LOCAL_HEADER_FIELD;
        let local_before = read_u32(&zip_buf, local_field);

        patch_offsets(&mut zip_buf, &offsets, CORRECTION).unwrap();

        assert_eq!(read_u32(&zip_buf, local_field), local_before);
        assert_eq!(
            read_u32(&zip_buf, offsets.eocd_start + EOCD_CD_START_FIELD),
            offsets.cd_start as u32 + CORRECTION
        );
    }

    #[test]
    fn declared_size_smaller_than_entry_is_rejected() {
        let mut zip_buf = build_zip(&[("hello.txt", "hello world")], "");
        let mut offsets = find_offsets(&zip_buf).unwrap();
        offsets.cd_size = 10;

        assert!(matches!(
            patch_offsets(&mut zip_buf, &offsets, CORRECTION),
            Err(PolyglotError::CentralDirectoryOverrun)
        ));
    }

    #[test]
    fn declared_size_larger_than_directory_is_rejected() {
        let mut zip_buf = build_zip(&[("hello.txt", "hello world")], "");
        let mut offsets = find_offsets(&zip_buf).unwrap();
        offsets.cd_size += 1;

        assert!(matches!(
            patch_offsets(&mut zip_buf, &offsets, CORRECTION),
            Err(PolyglotError::CentralDirectoryOverrun)
        ));
    }

    #[test]
    fn oversized_name_length_is_rejected() {
        let mut zip_buf = build_zip(&[("hello.txt", "hello world")], "");
        let offsets = find_offsets(&zip_buf).unwrap();
        let name_field = offsets.cd_start + CD_ENTRY_NAME_LENGTH_FIELD;
        LittleEndian::write_u16(&mut zip_buf[name_field..], 0xFFFF);

        assert!(matches!(
            patch_offsets(&mut zip_buf, &offsets, CORRECTION),
            Err(PolyglotError::CentralDirectoryOverrun)
        ));
    }

    #[test]
    fn corrupt_second_entry_is_rejected() {
        let mut zip_buf = build_zip(&[("a.txt", "a"), ("b.txt", "b")], "");
        let offsets = find_offsets(&zip_buf).unwrap();
        let second = entry_starts(&zip_buf, &offsets)[1];
        zip_buf[second] = 0;

        assert!(matches!(
            patch_offsets(&mut zip_buf, &offsets, CORRECTION),
            Err(PolyglotError::CentralDirectorySignatureMismatch)
        ));
    }

    #[test]
    fn zip64_local_header_offset_is_rejected() {
        let mut zip_buf = build_zip(&[("hello.txt", "hello world")], "");
        let offsets = find_offsets(&zip_buf).unwrap();
        write_u32(
            &mut zip_buf,
            offsets.cd_start + CD_ENTRY_LOCAL_HEADER_FIELD,
            ZIP64_SENTINEL
        );

        assert!(matches!(
            patch_offsets(&mut zip_buf, &offsets, CORRECTION),
            Err(PolyglotError::Zip64NotSupported)
        ));
    }

    #[test]
    fn offset_past_u32_is_rejected() {
        let mut zip_buf = build_zip(&[("hello.txt", "hello world")], "");
        let offsets = find_offsets(&zip_buf).unwrap();
        write_u32(
            &mut zip_buf,
            offsets.cd_start + CD_ENTRY_LOCAL_HEADER_FIELD,
            u32::MAX - 1
        );

        assert!(matches!(
            patch_offsets(&mut zip_buf, &offsets, CORRECTION),
            Err(PolyglotError::OffsetOverflow)
        ));
    }
}
