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
use polypng_png::validate_png_head;
use polypng_zip::contains_eocd_magic;

// Archive tools look for the last EOCD signature in the file. One inside the
// image would sit after ours once the image tail is appended.
pub fn validate_carrier_png(png_buf: &[u8]) -> Result<()> {
    validate_png_head(png_buf)?;
    if contains_eocd_magic(png_buf) {
        return Err(PolyglotError::AmbiguousContainer);
    }
    Ok(())
}
