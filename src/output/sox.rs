// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::Result;
use crate::wave::AudioBuffer;

pub enum SoxTarget<'a> {
    /// Play on the default audio device using `play`.
    Play,
    /// Encode into a file using `sox`, the format is derived from the extension.
    File(&'a Path),
}

/// Arguments describing the raw mono `f64` stream written to sox's stdin.
fn input_args(sample_rate: u32) -> Vec<OsString> {
    let sample_rate_str = format!("{}", sample_rate);
    [
        "-R", // make the output reproducible
        "--channels",
        "1",
        "--rate",
        sample_rate_str.as_str(),
        "--type",
        "f64",
        "/dev/stdin",
    ]
    .iter()
    .map(OsString::from)
    .collect()
}

fn sox_binaries() -> (PathBuf, PathBuf) {
    // For properly recording the sox dependency on nix:
    if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
        debug!("using sox from nix store {}", sox_bin);
        (Path::new(sox_bin).join("play"), Path::new(sox_bin).join("sox"))
    } else {
        ("play".into(), "sox".into())
    }
}

/// Spawn sox for the given target and hand its input stream to `callback`.
/// Waits for sox to finish after the callback returned.
pub fn with_sox<R, F: FnOnce(&mut dyn io::Write) -> io::Result<R>>(
    sample_rate: u32,
    target: SoxTarget,
    callback: F,
) -> io::Result<R> {
    let (play, sox) = sox_binaries();
    let mut command = match target {
        SoxTarget::Play => {
            let mut command = Command::new(&play);
            command
                .args(input_args(sample_rate))
                .stdout(Stdio::null())
                .stderr(Stdio::null());
            command
        }
        SoxTarget::File(outfile) => {
            let mut command = Command::new(&sox);
            command.args(input_args(sample_rate)).arg(outfile);
            command
        }
    };
    let mut player = command.stdin(Stdio::piped()).spawn()?;

    let mut audio_stream = player.stdin.take().ok_or_else(|| {
        io::Error::new(io::ErrorKind::BrokenPipe, "sox did not provide an input stream")
    })?;

    let result = callback(&mut audio_stream);

    // sox exits once its input stream is closed
    drop(audio_stream);
    let status = player.wait()?;
    if !status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sox exited with {}", status),
        ));
    }

    result
}

/// Write a rendered buffer to sox, either playing it or storing it in `outfile`.
pub fn output(buffer: &AudioBuffer, outfile: Option<&Path>) -> Result<()> {
    info!(
        "writing {} samples ({:.2} seconds) at {} Hz",
        buffer.len(),
        buffer.duration(),
        buffer.sample_rate()
    );
    let target = match outfile {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path),
    };
    with_sox(buffer.sample_rate(), target, |audio_stream| {
        let mut bytes = vec![0u8; buffer.byte_len()];
        let n = buffer.copy_bytes_to(&mut bytes);
        debug_assert_eq!(n, buffer.len());
        audio_stream.write_all(&bytes)?;
        audio_stream.flush()
    })?;
    Ok(())
}
