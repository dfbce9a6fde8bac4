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

//! # polypng API
//!
//! This crate exposes the main public API through which other projects can
//! hide a ZIP archive inside a PNG image. The result is a single file that
//! image viewers show as the original picture and archive tools open as the
//! original archive.
//!
//! ## Disguising a ZIP in memory
//!
//! ```no_run
//! # fn main() -> polypng_api::Result<()> {
//! let zip_bytes = std::fs::read("archive.zip")?;
//! let png_bytes = std::fs::read("picture.png")?;
//! let polyglot = polypng_api::disguise(&zip_bytes, &png_bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Disguising files on disk
//!
//! ```no_run
//! # fn main() -> polypng_api::Result<()> {
//! polypng_api::disguise_file("archive.zip", "picture.png", "archive.zip.png")?;
//! # Ok(())
//! # }
//! ```

use std::{fs, path::Path};

use assembler::assemble_polyglot;
use polypng_png::png_types::EMBEDDED_DATA_OFFSET;
use polypng_zip::relocate_zip_buffer;
use validator::validate_carrier_png;

pub use polypng_common::{PolyglotError, Result};

mod assembler;
mod validator;

/// Builds a file that is both the PNG in `png_buf` and the ZIP in `zip_buf`.
///
/// The archive is stored in a private ancillary chunk right after IHDR, so
/// decoders skip it. Every absolute offset in the archive's central directory
/// is moved forward by the bytes that now precede the archive, so ZIP readers
/// find each entry where it really is.
///
/// Neither input is modified. Returns: the combined file, or the first
/// precondition that failed. No partial output is produced.
pub fn disguise(zip_buf: &[u8], png_buf: &[u8]) -> Result<Vec<u8>> {
    validate_carrier_png(png_buf)?;
    let relocated_zip = relocate_zip_buffer(zip_buf, EMBEDDED_DATA_OFFSET as u32)?;
    assemble_polyglot(png_buf, &relocated_zip)
}

/// Reads a ZIP and a PNG from disk and writes their combination to
/// `out_path`.
///
/// The output file is only created once both inputs have been combined
/// successfully.
pub fn disguise_file<Z, P, O>(zip_path: Z, png_path: P, out_path: O) -> Result<()>
where
    Z: AsRef<Path>,
    P: AsRef<Path>,
    O: AsRef<Path>
{
    let zip_buf = fs::read(zip_path)?;
    let png_buf = fs::read(png_path)?;
    let polyglot = disguise(&zip_buf, &png_buf)?;
    fs::write(out_path, polyglot)?;
    Ok(())
}
