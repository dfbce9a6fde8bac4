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

use std::{fmt, io, rc::Rc};

use deku::prelude::*;

/// Common error type making it easier to share `Result`s between polypng crates.
///
/// In general designed to avoid needing utilities like `map_err`.
#[derive(Debug, Clone)]
pub enum PolyglotError {
    /// polypng-cli encountered an error while processing something specific to
    /// the command line implementation. For example, the wrong number of
    /// arguments was passed via the shell.
    Cli(String),
    /// The image buffer does not start with the PNG signature followed by an
    /// `IHDR` chunk of length 13, or is too short to hold that whole chunk.
    InvalidHeader,
    /// The image buffer already contains the ZIP End Of Central Directory
    /// signature (`PK\x05\x06`). Archive tools scan backwards for it, so the
    /// combined file could be parsed from the wrong place.
    AmbiguousContainer,
    /// No End Of Central Directory signature was found in the archive buffer.
    EndOfDirectoryNotFound,
    /// The End Of Central Directory signature was found, but too close to the
    /// end of the buffer for the rest of the record to be present.
    TruncatedEndOfDirectory,
    /// The End Of Central Directory points at a central directory which does
    /// not come before it.
    InvalidDirectoryOrder,
    /// A central directory entry did not start with `PK\x01\x02`.
    CentralDirectorySignatureMismatch,
    /// The sizes of the central directory entries do not add up to the size
    /// declared in the End Of Central Directory, or an entry runs into it.
    CentralDirectoryOverrun,
    /// An offset field holds `0xFFFFFFFF`, meaning the real value lives in a
    /// ZIP64 extension. ZIP64 archives are not supported.
    Zip64NotSupported,
    /// Moving an offset by the size of the PNG prefix pushed it past what a
    /// 32-bit ZIP field can hold.
    OffsetOverflow,
    /// The archive is longer than the largest chunk PNG allows (`2^31 - 1`).
    ArchiveTooLarge,
    /// Something went wrong serialising a chunk header. See [DekuError].
    ByteSerialisationFailed(DekuError),
    /// An error occurred while reading the inputs or writing the output. Since
    /// only `disguise_file` and `polypng-cli` touch the disk, it's likely that
    /// one of the file paths passed in is invalid.
    FileIoError(Rc<io::Error>)
}

/// Result type where the error is always [PolyglotError].
pub type Result<T> = std::result::Result<T, PolyglotError>;

impl fmt::Display for PolyglotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolyglotError::Cli(message) => write!(f, "{message}"),
            PolyglotError::InvalidHeader => write!(f, "invalid PNG header"),
            PolyglotError::AmbiguousContainer => {
                write!(f, "PNG already contains a ZIP end of central directory signature")
            }
            PolyglotError::EndOfDirectoryNotFound => {
                write!(f, "ZIP end of central directory not found")
            }
            PolyglotError::TruncatedEndOfDirectory => {
                write!(f, "ZIP end of central directory is truncated")
            }
            PolyglotError::InvalidDirectoryOrder => {
                write!(f, "ZIP central directory does not precede its end record")
            }
            PolyglotError::CentralDirectorySignatureMismatch => {
                write!(f, "ZIP central directory signature not found")
            }
            PolyglotError::CentralDirectoryOverrun => {
                write!(f, "ZIP central directory entries overrun the declared size")
            }
            PolyglotError::Zip64NotSupported => write!(f, "ZIP64 archives are not supported"),
            PolyglotError::OffsetOverflow => {
                write!(f, "relocated ZIP offset does not fit in 32 bits")
            }
            PolyglotError::ArchiveTooLarge => write!(f, "ZIP is too large for a PNG chunk"),
            PolyglotError::ByteSerialisationFailed(err) => write!(f, "serialisation: {err}"),
            PolyglotError::FileIoError(err) => write!(f, "io: {err}")
        }
    }
}

impl std::error::Error for PolyglotError {}

// Automatic conversion from other types of error to PolyglotError makes the rest of the code cleaner
impl From<io::Error> for PolyglotError {
    fn from(value: io::Error) -> Self {
        PolyglotError::FileIoError(value.into())
    }
}

impl From<DekuError> for PolyglotError {
    fn from(value: DekuError) -> Self {
        PolyglotError::ByteSerialisationFailed(value)
    }
}
