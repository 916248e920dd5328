// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Everything that can go wrong while turning data into sound.

use std::io;

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum SonifyError {
    /// The input data is not one-dimensional.
    #[snafu(display("Expected one-dimensional data, got shape {:?}", shape))]
    Shape { shape: Vec<usize> },

    /// The end of a requested range lies before its start.
    #[snafu(display("Invalid {} range: {} to {}", what, start, end))]
    Range {
        what: &'static str,
        start: i64,
        end: i64,
    },

    /// An argument could not be interpreted, e.g. an unknown wave kind or a malformed note.
    #[snafu(display("Invalid argument: {}", message))]
    InvalidArgument { message: String },

    /// Parameters that are individually valid but inconsistent with each other.
    #[snafu(display("Invalid configuration: {}", message))]
    Configuration { message: String },

    /// A rendered waveform was requested before anything was rendered.
    #[snafu(display("No waveform has been rendered yet"))]
    NotRendered {},

    #[snafu(display("Audio output failed: {}", source))]
    Io { source: io::Error },
}

impl SonifyError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        SonifyError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        SonifyError::Configuration {
            message: message.into(),
        }
    }
}

impl From<io::Error> for SonifyError {
    fn from(source: io::Error) -> Self {
        SonifyError::Io { source }
    }
}

pub type Result<T, E = SonifyError> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        let err = SonifyError::Range {
            what: "MIDI",
            start: 72,
            end: 60,
        };
        assert_eq!(err.to_string(), "Invalid MIDI range: 72 to 60");

        let err = SonifyError::Shape { shape: vec![3, 2] };
        assert_eq!(
            err.to_string(),
            "Expected one-dimensional data, got shape [3, 2]"
        );
        assert_eq!(
            SonifyError::NotRendered {}.to_string(),
            "No waveform has been rendered yet"
        );
    }
}
