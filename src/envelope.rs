// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use crate::error::{Result, SonifyError};

/// Parameters of an Attack-Decay-Sustain-Release envelope spanning a single note.
/// The amplitude first rises from `start` to one over `attack` seconds,
/// then decays over an additional `decay` seconds to the `sustain` level where it is held
/// until `release` seconds before the end of the note. It then falls back to zero,
/// reaching it exactly at `note_length`.
#[derive(Debug, Clone, PartialEq)]
pub struct ADSR {
    /// Time in seconds to go from `start` to 1.0
    pub attack: f64,
    /// Time in seconds to go from 1.0 to `sustain`.
    pub decay: f64,
    /// Time in seconds to go from `sustain` to 0.0.
    pub release: f64,
    /// Total length of the note the envelope is applied to.
    pub note_length: f64,
    /// Amplitude at the very beginning of the note.
    pub start: f64,
    /// Constant amplitude between decay and release.
    pub sustain: f64,
}

impl Default for ADSR {
    fn default() -> Self {
        ADSR {
            attack: 0.2,
            decay: 0.1,
            release: 0.2,
            note_length: 1.0,
            start: 0.0,
            sustain: 0.8,
        }
    }
}

impl ADSR {
    /// Check the parameters for consistency and turn them into an evaluable envelope.
    pub fn build(self) -> Result<Envelope> {
        Envelope::new(self)
    }
}

/// A validated ADSR envelope, evaluated over the time since the start of a note.
///
/// # Example
///
/// ```
/// use sonify::envelope::*;
/// let e = ADSR {
///     attack: 0.25,
///     decay: 0.25,
///     release: 0.25,
///     note_length: 1.0,
///     start: 0.0,
///     sustain: 0.5,
/// }
/// .build()
/// .unwrap();
/// assert_eq!(e.get_amplitude(0.0), 0.0);
/// assert_eq!(e.get_amplitude(0.125), 0.5);
/// assert_eq!(e.get_amplitude(0.25), 1.0);
/// assert_eq!(e.get_amplitude(0.375), 0.75);
/// assert_eq!(e.get_amplitude(0.5), 0.5);
/// assert_eq!(e.get_amplitude(0.75), 0.5);
/// assert_eq!(e.get_amplitude(0.875), 0.25);
/// assert_eq!(e.get_amplitude(1.0), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    params: ADSR,
    attack_until: f64,
    decay_until: f64,
    sustain_until: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        let params = ADSR::default();
        Envelope {
            attack_until: params.attack,
            decay_until: params.attack + params.decay,
            sustain_until: params.note_length - params.release,
            params,
        }
    }
}

impl Envelope {
    pub fn new(params: ADSR) -> Result<Envelope> {
        let durations = [
            ("attack", params.attack),
            ("decay", params.decay),
            ("release", params.release),
            ("note length", params.note_length),
        ];
        for &(what, value) in &durations {
            if !value.is_finite() || value < 0.0 {
                return Err(SonifyError::configuration(format!(
                    "{} must be a non-negative duration, got {}",
                    what, value
                )));
            }
        }
        if params.note_length == 0.0 {
            return Err(SonifyError::configuration("note length must be positive"));
        }
        for &(what, value) in &[("start", params.start), ("sustain", params.sustain)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SonifyError::configuration(format!(
                    "{} amplitude must lie in [0, 1], got {}",
                    what, value
                )));
            }
        }
        if params.attack + params.decay > params.note_length {
            return Err(SonifyError::configuration(format!(
                "attack ({}) and decay ({}) exceed the note length ({})",
                params.attack, params.decay, params.note_length
            )));
        }
        if params.release > params.note_length {
            return Err(SonifyError::configuration(format!(
                "release ({}) exceeds the note length ({})",
                params.release, params.note_length
            )));
        }

        Ok(Envelope {
            attack_until: params.attack,
            decay_until: params.attack + params.decay,
            sustain_until: params.note_length - params.release,
            params,
        })
    }

    pub fn params(&self) -> &ADSR {
        &self.params
    }

    pub fn note_length(&self) -> f64 {
        self.params.note_length
    }

    /// Evaluate the envelope curve at this point in time.
    pub fn get_amplitude(&self, time: f64) -> f64 {
        let p = &self.params;
        if time < self.attack_until {
            // Rise from `start` to 1.0
            p.start + (1.0 - p.start) * time / p.attack
        } else if time < self.decay_until {
            // Drop from 1.0 to `sustain`
            let progress = (time - self.attack_until) / p.decay;
            1.0 - progress * (1.0 - p.sustain)
        } else if time < self.sustain_until {
            p.sustain
        } else if p.release > 0.0 {
            // Drop from `sustain` to 0.0 at the end of the note
            p.sustain * (p.note_length - time) / p.release
        } else {
            0.0
        }
    }

    /// Evaluate the envelope at every given point in time.
    pub fn get_amplitudes(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.get_amplitude(t)).collect()
    }
}
