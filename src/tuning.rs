// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use crate::note::*;
use crate::util;

/// Defines the tuning by assinging a frequency to a certain note.
/// This defines the frequencies of all other notes at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use sonify::note::*;
/// use sonify::tuning::*;
/// assert_eq!(Tuning::default().frequency(Note::from_midi(57)), 220.0);
/// assert_eq!(Tuning::default().frequency(Note::from_midi(81)), 880.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    pub reference_note: Note,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a note relative to this tuning.
    pub fn frequency(&self, other: Note) -> f64 {
        let semitones = other.index() - self.reference_note.index();
        self.reference_frequency * util::from_semitones(semitones as f64)
    }

    /// Fractional note index of a frequency, the inverse of [`Tuning::frequency`].
    pub fn note_index(&self, frequency: f64) -> f64 {
        self.reference_note.index() as f64 + util::to_semitones(frequency / self.reference_frequency)
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_note: Note::from_midi(69),
            reference_frequency: 440.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn middle_c() {
        let c4 = Tuning::default().frequency(Note::from_midi(60));
        assert!((c4 - 261.6256).abs() < 1e-4);
    }

    #[test]
    fn inverse() {
        let tuning = Tuning::default();
        for midi in 0..128u8 {
            let f = tuning.frequency(Note::from_midi(midi));
            assert!((tuning.note_index(f) - midi as f64).abs() < 1e-9);
        }
    }
}
