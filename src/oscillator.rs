// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Sampling basic wave shapes into buffers of fixed length.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SonifyError};

/// Position within one period of a wave, in the half-open interval [0, 1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Phase(f64);

impl Phase {
    pub const ZERO: Phase = Phase(0.0);

    pub fn new(offset: f64) -> Phase {
        let wrapped = offset.rem_euclid(1.0);
        // rem_euclid may round up to exactly 1.0 for tiny negative offsets
        if wrapped >= 1.0 {
            Phase(0.0)
        } else {
            Phase(wrapped)
        }
    }

    /// Phase of the sample at `index` for a wave of `frequency` sampled at `sample_rate`.
    pub fn at_sample(index: usize, frequency: f64, sample_rate: f64) -> Phase {
        Phase::new(index as f64 * frequency / sample_rate)
    }

    pub fn offset(self) -> f64 {
        self.0
    }
}

/// The wave shapes an oscillator can produce.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WaveKind {
    Sine,
    /// Alternates between 1 and -1 with a 50% duty cycle.
    Square,
    /// Rises linearly from -1 to 1 in every period.
    Sawtooth,
}

impl WaveKind {
    pub const ALL: [WaveKind; 3] = [WaveKind::Sine, WaveKind::Square, WaveKind::Sawtooth];

    pub fn name(self) -> &'static str {
        match self {
            WaveKind::Sine => "sine",
            WaveKind::Square => "square",
            WaveKind::Sawtooth => "sawtooth",
        }
    }

    pub fn eval(self, phase: Phase) -> f64 {
        let offset = phase.offset();
        use std::f64::consts::PI;
        match self {
            WaveKind::Sine => (offset * 2.0 * PI).sin(),
            WaveKind::Square => {
                if offset < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveKind::Sawtooth => 2.0 * offset - 1.0,
        }
    }

    /// Sample `duration` seconds of this wave.
    pub fn render(self, frequency: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
        match self {
            WaveKind::Sine => sine_wave(frequency, duration, sample_rate),
            WaveKind::Square => square_wave(frequency, duration, sample_rate),
            WaveKind::Sawtooth => sawtooth_wave(frequency, duration, sample_rate),
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WaveKind {
    type Err = SonifyError;

    /// ```
    /// # use sonify::oscillator::WaveKind;
    /// assert_eq!("square".parse::<WaveKind>().unwrap(), WaveKind::Square);
    /// let err = "triangle".parse::<WaveKind>().unwrap_err();
    /// assert!(err.to_string().contains("sine, square, sawtooth"));
    /// ```
    fn from_str(s: &str) -> Result<WaveKind> {
        WaveKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = WaveKind::ALL.iter().map(|kind| kind.name()).collect();
                SonifyError::invalid_argument(format!(
                    "unknown wave kind {:?}, expected one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Number of samples covering `duration` seconds, shared by all wave shapes
/// so that the buffers of consecutive notes line up.
pub fn sample_count(duration: f64, sample_rate: f64) -> usize {
    let count = (duration * sample_rate).round();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

fn sample_wave(kind: WaveKind, frequency: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
    (0..sample_count(duration, sample_rate))
        .map(|index| kind.eval(Phase::at_sample(index, frequency, sample_rate)))
        .collect()
}

/// ```
/// # use sonify::oscillator::*;
/// let wave = sine_wave(1.0, 1.0, 4.0);
/// assert_eq!(wave.len(), 4);
/// assert!((wave[1] - 1.0).abs() < 1e-12);
/// assert!((wave[3] + 1.0).abs() < 1e-12);
/// ```
pub fn sine_wave(frequency: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
    sample_wave(WaveKind::Sine, frequency, duration, sample_rate)
}

/// ```
/// # use sonify::oscillator::*;
/// assert_eq!(square_wave(1.0, 1.0, 4.0), vec![1.0, 1.0, -1.0, -1.0]);
/// ```
pub fn square_wave(frequency: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
    sample_wave(WaveKind::Square, frequency, duration, sample_rate)
}

/// ```
/// # use sonify::oscillator::*;
/// assert_eq!(sawtooth_wave(1.0, 1.0, 4.0), vec![-1.0, -0.5, 0.0, 0.5]);
/// ```
pub fn sawtooth_wave(frequency: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
    sample_wave(WaveKind::Sawtooth, frequency, duration, sample_rate)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equal_lengths() {
        let cases: [(f64, f64); 4] = [(1.0, 44100.0), (0.25, 8000.0), (0.1, 44100.0), (0.00001, 44100.0)];
        for &(duration, rate) in &cases {
            let expected = (duration * rate).round() as usize;
            for &kind in &WaveKind::ALL {
                assert_eq!(kind.render(440.0, duration, rate).len(), expected);
            }
        }
    }

    #[test]
    fn bounded() {
        for &kind in &WaveKind::ALL {
            for sample in kind.render(261.63, 0.1, 44100.0) {
                assert!(sample >= -1.0 && sample <= 1.0);
            }
        }
    }

    #[test]
    fn phase_wraps() {
        assert_eq!(Phase::new(1.25).offset(), 0.25);
        assert_eq!(Phase::new(-0.25).offset(), 0.75);
        assert_eq!(Phase::new(3.0), Phase::ZERO);
        assert!(Phase::new(-1e-20).offset() < 1.0);
    }

    #[test]
    fn degenerate_durations() {
        assert!(sine_wave(440.0, 0.0, 44100.0).is_empty());
        assert!(square_wave(440.0, -1.0, 44100.0).is_empty());
    }

    #[test]
    fn names() {
        for &kind in &WaveKind::ALL {
            assert_eq!(kind.to_string().parse::<WaveKind>().unwrap(), kind);
        }
        match "triangle".parse::<WaveKind>() {
            Err(SonifyError::InvalidArgument { message }) => {
                assert!(message.contains("sine"));
                assert!(message.contains("square"));
                assert!(message.contains("sawtooth"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
