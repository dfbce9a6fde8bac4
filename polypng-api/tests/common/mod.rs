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

//! Fixture builders shared by the integration tests.

use std::io::{Cursor, Write};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

pub const FILES: &[(&str, &str)] = &[
    ("readme.txt", "This archive is also a picture."),
    ("nested/data.csv", "a,b,c\n1,2,3\n4,5,6\n"),
    ("nested/deeper/empty.txt", "")
];

pub fn build_zip(files: &[(&str, &str)], method: CompressionMethod) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(method);
    for (path, data) in files {
        zip.start_file(*path, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn png_chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut chunk = (data.len() as u32).to_be_bytes().to_vec();
    chunk.extend(chunk_type);
    chunk.extend(data);
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    chunk.extend(hasher.finalize().to_be_bytes());
    chunk
}

/// A 1x1, 8-bit greyscale, black PNG.
pub fn single_pixel_png() -> Vec<u8> {
    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend(png_chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0]));
    // zlib stream holding one stored block: filter byte 0, pixel 0
    png.extend(png_chunk(
        b"IDAT",
        &[0x78, 0x01, 0x01, 0x02, 0x00, 0xFD, 0xFF, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01]
    ));
    png.extend(png_chunk(b"IEND", &[]));
    png
}

pub struct Chunk {
    pub chunk_type: [u8; 4],
    pub data_start: usize,
    pub data: Vec<u8>,
    pub crc_valid: bool
}

/// Walks a PNG chunk by chunk. Panics if the chunks don't end exactly at the
/// end of the buffer.
pub fn read_chunks(png: &[u8]) -> Vec<Chunk> {
    let mut chunks = vec![];
    let mut pos = 8;
    while pos < png.len() {
        let length = u32::from_be_bytes(png[pos..(pos + 4)].try_into().unwrap()) as usize;
        let chunk_type: [u8; 4] = png[(pos + 4)..(pos + 8)].try_into().unwrap();
        let data_start = pos + 8;
        let data = png[data_start..(data_start + length)].to_vec();
        let crc_pos = data_start + length;
        let crc = u32::from_be_bytes(png[crc_pos..(crc_pos + 4)].try_into().unwrap());
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&chunk_type);
        hasher.update(&data);
        chunks.push(Chunk {
            chunk_type,
            data_start,
            data,
            crc_valid: hasher.finalize() == crc
        });
        pos = crc_pos + 4;
    }
    assert_eq!(pos, png.len());
    chunks
}
