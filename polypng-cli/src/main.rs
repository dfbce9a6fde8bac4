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

use polypng_api::{disguise_file, PolyglotError, Result};
use std::{env, ffi::OsString, process};

const USAGE: &str = "usage: polypng ZIP-FILE PNG-FILE OUT-FILE";

/// Hides a ZIP archive inside a PNG image.
///
/// ```
/// $ polypng archive.zip picture.png archive.zip.png
/// Wrote "archive.zip.png" to disk
/// $ unzip -l archive.zip.png
/// ```
///
/// The output opens as `picture.png` in any image viewer and as
/// `archive.zip` in any archive tool. Set `RUST_LOG=debug` to see the
/// offsets being rewritten.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(env::args_os().skip(1).collect()) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

// Paths stay as OsStrings, they don't have to be valid UTF-8
fn run(args: Vec<OsString>) -> Result<()> {
    let [zip_path, png_path, out_path] =
        <[OsString; 3]>::try_from(args).map_err(|_args| PolyglotError::Cli(USAGE.into()))?;
    log::info!("Disguising {:?} as {:?}", zip_path, png_path);

    disguise_file(&zip_path, &png_path, &out_path)?;
    println!("Wrote {:?} to disk", out_path);

    Ok(())
}
