// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Musical keys written as `<TONIC>:<mode>`, e.g. `C:maj` or `A#:min`.

use std::str::FromStr;

use crate::error::{Result, SonifyError};
use crate::note::{Accidental, Note, NoteName, Spelling};

/// The scale built on top of a tonic.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    /// All twelve semitones.
    Chromatic,
}

const MAJOR_STEPS: [usize; 7] = [0, 2, 4, 5, 7, 9, 11];

impl Mode {
    /// Which degree of the major scale this mode starts on, `None` for the chromatic scale.
    fn major_rotation(self) -> Option<usize> {
        match self {
            Mode::Ionian => Some(0),
            Mode::Dorian => Some(1),
            Mode::Phrygian => Some(2),
            Mode::Lydian => Some(3),
            Mode::Mixolydian => Some(4),
            Mode::Aeolian => Some(5),
            Mode::Locrian => Some(6),
            Mode::Chromatic => None,
        }
    }

    /// Semitone offsets of the scale degrees above the tonic, ascending.
    ///
    /// ```
    /// # use sonify::key::Mode;
    /// assert_eq!(Mode::Ionian.intervals(), vec![0, 2, 4, 5, 7, 9, 11]);
    /// assert_eq!(Mode::Aeolian.intervals(), vec![0, 2, 3, 5, 7, 8, 10]);
    /// assert_eq!(Mode::Chromatic.intervals().len(), 12);
    /// ```
    pub fn intervals(self) -> Vec<usize> {
        match self.major_rotation() {
            None => (0..12).collect(),
            Some(rotation) => {
                let root = MAJOR_STEPS[rotation];
                (0..7)
                    .map(|degree| (MAJOR_STEPS[(rotation + degree) % 7] + 12 - root) % 12)
                    .collect()
            }
        }
    }
}

impl FromStr for Mode {
    type Err = SonifyError;

    fn from_str(s: &str) -> Result<Mode> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "maj" | "major" | "ionian" => Mode::Ionian,
            "min" | "minor" | "aeolian" => Mode::Aeolian,
            "dorian" => Mode::Dorian,
            "phrygian" => Mode::Phrygian,
            "lydian" => Mode::Lydian,
            "mixolydian" => Mode::Mixolydian,
            "locrian" => Mode::Locrian,
            "chrom" | "chromatic" => Mode::Chromatic,
            _ => {
                return Err(SonifyError::invalid_argument(format!(
                    "unknown mode {:?}",
                    s
                )))
            }
        })
    }
}

/// A tonic together with a mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Key {
    /// Pitch class of the tonic, 0 being C.
    tonic: usize,
    accidental: Accidental,
    mode: Mode,
}

/// Pitch classes of the major keys notated with flats (F, Bb, Eb, Ab, Db, Gb).
const FLAT_MAJOR_KEYS: [usize; 6] = [5, 10, 3, 8, 1, 6];

impl Key {
    pub fn new(tonic: NoteName, accidental: Accidental, mode: Mode) -> Self {
        let tonic = (tonic.semitones() + accidental.semitones()).rem_euclid(12) as usize;
        Self {
            tonic,
            accidental,
            mode,
        }
    }

    pub fn tonic(&self) -> usize {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Pitch classes of the scale degrees, in scale order starting at the tonic.
    pub fn pitch_classes(&self) -> Vec<usize> {
        self.mode
            .intervals()
            .into_iter()
            .map(|interval| (self.tonic + interval) % 12)
            .collect()
    }

    /// Whether black keys in this key are conventionally written with sharps or flats.
    ///
    /// ```
    /// # use sonify::key::Key;
    /// # use sonify::note::Spelling;
    /// assert_eq!("C:maj".parse::<Key>().unwrap().spelling(), Spelling::Sharps);
    /// assert_eq!("F:maj".parse::<Key>().unwrap().spelling(), Spelling::Flats);
    /// assert_eq!("D:min".parse::<Key>().unwrap().spelling(), Spelling::Flats);
    /// assert_eq!("A#:min".parse::<Key>().unwrap().spelling(), Spelling::Sharps);
    /// ```
    pub fn spelling(&self) -> Spelling {
        match self.accidental {
            Accidental::Flat => return Spelling::Flats,
            Accidental::Sharp => return Spelling::Sharps,
            Accidental::Base => {}
        }
        let relative_major = self
            .mode
            .major_rotation()
            .map(|rotation| (self.tonic + 12 - MAJOR_STEPS[rotation]) % 12);
        match relative_major {
            Some(pc) if FLAT_MAJOR_KEYS.contains(&pc) => Spelling::Flats,
            _ => Spelling::Sharps,
        }
    }

    /// All notes of this key within the inclusive octave range, sorted by pitch.
    ///
    /// Octaves follow scientific pitch notation, so every scale degree lands in the octave
    /// starting at the C of that number.
    ///
    /// ```
    /// # use sonify::key::Key;
    /// let key: Key = "C:maj".parse().unwrap();
    /// let notes = key.notes(4, 4).unwrap();
    /// assert_eq!(notes.len(), 7);
    /// assert_eq!(notes[0].to_midi(), 60);
    /// assert_eq!(notes[6].to_midi(), 71);
    /// ```
    pub fn notes(&self, low_octave: i32, high_octave: i32) -> Result<Vec<Note>> {
        if high_octave < low_octave {
            return Err(SonifyError::Range {
                what: "octave",
                start: low_octave as i64,
                end: high_octave as i64,
            });
        }
        let pitch_classes = self.pitch_classes();
        let mut notes = Vec::new();
        for octave in low_octave..=high_octave {
            for &pc in &pitch_classes {
                let midi = (octave as i64 + 1) * 12 + pc as i64;
                let note = Note::try_from_midi(midi).ok_or_else(|| {
                    SonifyError::invalid_argument(format!(
                        "octave {} of key {:?} is outside of the MIDI range",
                        octave, self
                    ))
                })?;
                notes.push(note);
            }
        }
        notes.sort();
        notes.dedup();
        Ok(notes)
    }
}

impl FromStr for Key {
    type Err = SonifyError;

    /// Parse `<TONIC>:<mode>`, where the tonic is a note letter with an optional accidental.
    fn from_str(s: &str) -> Result<Key> {
        let malformed = || SonifyError::invalid_argument(format!("malformed key {:?}", s));

        let mut parts = s.trim().splitn(2, ':');
        let tonic_str = parts.next().ok_or_else(malformed)?;
        let mode_str = parts.next().ok_or_else(malformed)?;

        let mut tonic_chars = tonic_str.chars();
        let name = tonic_chars
            .next()
            .and_then(NoteName::from_char)
            .ok_or_else(malformed)?;
        let accidental = Accidental::from_str_opt(tonic_chars.as_str()).ok_or_else(malformed)?;
        let mode = mode_str.parse()?;
        Ok(Key::new(name, accidental, mode))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn labels(key: &str, low: i32, high: i32) -> Vec<String> {
        let key: Key = key.parse().unwrap();
        key.notes(low, high)
            .unwrap()
            .into_iter()
            .map(|n| n.label(key.spelling()))
            .collect()
    }

    #[test]
    fn major_and_minor() {
        assert_eq!(
            labels("C:maj", 4, 4),
            vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4"]
        );
        assert_eq!(
            labels("B:min", 4, 4),
            vec!["C#4", "D4", "E4", "F#4", "G4", "A4", "B4"]
        );
        assert_eq!(
            labels("Bb:maj", 3, 3),
            vec!["C3", "D3", "Eb3", "F3", "G3", "A3", "Bb3"]
        );
    }

    #[test]
    fn octave_counts() {
        for key in &["A#:min", "B:min", "C:maj", "D:dorian"] {
            let key: Key = key.parse().unwrap();
            assert_eq!(key.notes(4, 4).unwrap().len(), 7);
            assert_eq!(key.notes(4, 5).unwrap().len(), 14);
            assert_eq!(key.notes(3, 5).unwrap().len(), 21);
        }
        let chromatic: Key = "C:chrom".parse().unwrap();
        assert_eq!(chromatic.notes(3, 5).unwrap().len(), 36);
    }

    #[test]
    fn parse_errors() {
        for key in &["C", "H:maj", "C:blues", "Cx:maj", ":maj", ""] {
            match key.parse::<Key>() {
                Err(SonifyError::InvalidArgument { .. }) => {}
                other => panic!("unexpected {:?} for {:?}", other, key),
            }
        }
    }

    #[test]
    fn accidentals() {
        let sharp: Key = "A#:min".parse().unwrap();
        let flat: Key = "B♭:minor".parse().unwrap();
        assert_eq!(sharp.pitch_classes(), flat.pitch_classes());
        assert_eq!(flat.spelling(), Spelling::Flats);
        assert_eq!("Cb:maj".parse::<Key>().unwrap().tonic(), 11);
    }

    #[test]
    fn inverted_octaves() {
        let key: Key = "C:maj".parse().unwrap();
        match key.notes(5, 4) {
            Err(SonifyError::Range { start: 5, end: 4, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(key.notes(9, 10).is_err());
    }
}
