// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is.

use std::fmt;

use crate::error::{Result, SonifyError};

/// A "note" is just an index on a keyboard.
/// This definition follows the MIDI standard where C4 corresponds to index 60.
///
/// Note indices range from 0 to 127. At 12 semitones per octave,
/// this corresponds to a dynamic range of more then 10 octaves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Note(u8);

/// The name of a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteName {
    /// Semitones above C within the same octave.
    pub fn semitones(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    pub fn from_char(ch: char) -> Option<NoteName> {
        Some(match ch.to_ascii_uppercase() {
            'A' => NoteName::A,
            'B' => NoteName::B,
            'C' => NoteName::C,
            'D' => NoteName::D,
            'E' => NoteName::E,
            'F' => NoteName::F,
            'G' => NoteName::G,
            _ => return None,
        })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            NoteName::A => 'A',
            NoteName::B => 'B',
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
        };
        write!(f, "{}", ch)
    }
}

/// Any offset applied to a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Accidental {
    /// The note is a half-tone lower then indicated by its name.
    Flat,
    /// The note is left unchanged.
    Base,
    /// The note is a half-tone higher then indicated by its name.
    Sharp,
}

impl Accidental {
    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Base => 0,
            Accidental::Flat => -1,
            Accidental::Sharp => 1,
        }
    }

    /// Parse the textual forms accepted after a note letter.
    pub fn from_str_opt(s: &str) -> Option<Accidental> {
        match s {
            "sharp" | "♯" | "#" => Some(Accidental::Sharp),
            "flat" | "♭" | "b" => Some(Accidental::Flat),
            "" => Some(Accidental::Base),
            _ => None,
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accidental::Flat => write!(f, "b"),
            Accidental::Base => Ok(()),
            Accidental::Sharp => write!(f, "#"),
        }
    }
}

/// How to spell the black keys when turning a note back into a label.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Spelling {
    Sharps,
    Flats,
}

impl Default for Spelling {
    fn default() -> Self {
        Spelling::Sharps
    }
}

const SHARP_NAMES: [(NoteName, Accidental); 12] = [
    (NoteName::C, Accidental::Base),
    (NoteName::C, Accidental::Sharp),
    (NoteName::D, Accidental::Base),
    (NoteName::D, Accidental::Sharp),
    (NoteName::E, Accidental::Base),
    (NoteName::F, Accidental::Base),
    (NoteName::F, Accidental::Sharp),
    (NoteName::G, Accidental::Base),
    (NoteName::G, Accidental::Sharp),
    (NoteName::A, Accidental::Base),
    (NoteName::A, Accidental::Sharp),
    (NoteName::B, Accidental::Base),
];

const FLAT_NAMES: [(NoteName, Accidental); 12] = [
    (NoteName::C, Accidental::Base),
    (NoteName::D, Accidental::Flat),
    (NoteName::D, Accidental::Base),
    (NoteName::E, Accidental::Flat),
    (NoteName::E, Accidental::Base),
    (NoteName::F, Accidental::Base),
    (NoteName::G, Accidental::Flat),
    (NoteName::G, Accidental::Base),
    (NoteName::A, Accidental::Flat),
    (NoteName::A, Accidental::Base),
    (NoteName::B, Accidental::Flat),
    (NoteName::B, Accidental::Base),
];

impl Note {
    pub const MIN: Note = Note(0);
    pub const MAX: Note = Note(127);

    /// Convert a note from standard notation to a MIDI note index.
    /// Note that different names may refer to the same note, e.g. a G♯ is the same as a A♭.
    /// Returns `None` if the note is not representable in the MIDI note system.
    ///
    /// # Examples
    ///
    /// ```
    /// use sonify::note::*;
    ///
    /// assert_eq!(Note::try_named(NoteName::A, Accidental::Base, 4), Some(Note::from_midi(69)));
    /// assert_eq!(Note::try_named(NoteName::C, Accidental::Sharp, 6), Some(Note::from_midi(85)));
    /// assert_eq!(Note::try_named(NoteName::G, Accidental::Flat, 2), Some(Note::from_midi(42)));
    /// assert_eq!(Note::try_named(NoteName::C, Accidental::Flat, -1), None);
    /// ```
    pub fn try_named(name: NoteName, accidental: Accidental, octave: i32) -> Option<Note> {
        // C4 is MIDI note number 60
        let normalize_index = 60 - 4 * 12;
        let note_index = octave
            .checked_mul(12)?
            .checked_add(name.semitones() + accidental.semitones() + normalize_index)?;
        Note::try_from_midi(note_index as i64)
    }

    /// Parse a name string of the format `<letter><accidental><octave>`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sonify::note::*;
    ///
    /// assert_eq!(Note::named_str("A4"), Some(Note::from_midi(69)));
    /// assert_eq!(Note::named_str("a4"), Some(Note::from_midi(69)));
    /// assert_eq!(Note::named_str("Csharp6"), Some(Note::from_midi(85)));
    /// assert_eq!(Note::named_str("C♯6"), Some(Note::from_midi(85)));
    /// assert_eq!(Note::named_str("Gb2"), Some(Note::from_midi(42)));
    /// assert_eq!(Note::named_str("C-1"), Some(Note::from_midi(0)));
    /// assert_eq!(Note::named_str("H2"), None);
    /// ```
    pub fn named_str(name_str: &str) -> Option<Note> {
        let mut name_chars = name_str.trim().chars();
        let name = NoteName::from_char(name_chars.next()?)?;

        let rest = name_chars.as_str();
        let octave_start = rest
            .find(|ch: char| ch.is_ascii_digit() || ch == '-')
            .unwrap_or_else(|| rest.len());
        let accidental = Accidental::from_str_opt(&rest[..octave_start])?;
        let octave = rest[octave_start..].parse().ok()?;
        Note::try_named(name, accidental, octave)
    }

    /// Like [`Note::named_str`], but reports malformed labels as an error.
    pub fn parse(name_str: &str) -> Result<Note> {
        Note::named_str(name_str).ok_or_else(|| {
            SonifyError::invalid_argument(format!(
                "cannot resolve note {:?} to a MIDI pitch",
                name_str
            ))
        })
    }

    /// # Panics
    ///
    /// If `midi_note` is outside of 0 - 127.
    pub fn from_midi(midi_note: u8) -> Note {
        assert!(midi_note < 128, "MIDI only has notes 0 - 127");
        Note(midi_note)
    }

    pub fn try_from_midi(midi_note: i64) -> Option<Note> {
        if (0..128).contains(&midi_note) {
            Some(Note(midi_note as u8))
        } else {
            None
        }
    }

    pub fn to_midi(self) -> u8 {
        self.0
    }

    /// Return the note index in a signed type, convenient for further calculations.
    pub fn index(self) -> i32 {
        self.0 as i32
    }

    /// Octave in scientific pitch notation, where C4 is middle C.
    pub fn octave(self) -> i32 {
        self.index() / 12 - 1
    }

    /// Position within the octave, 0 being C.
    pub fn pitch_class(self) -> usize {
        self.0 as usize % 12
    }

    /// Render the note as a label such as `C#4` or `Db4`.
    ///
    /// ```
    /// # use sonify::note::*;
    /// let note = Note::from_midi(61);
    /// assert_eq!(note.label(Spelling::Sharps), "C#4");
    /// assert_eq!(note.label(Spelling::Flats), "Db4");
    /// assert_eq!(Note::from_midi(0).to_string(), "C-1");
    /// ```
    pub fn label(self, spelling: Spelling) -> String {
        let table = match spelling {
            Spelling::Sharps => &SHARP_NAMES,
            Spelling::Flats => &FLAT_NAMES,
        };
        let (name, accidental) = table[self.pitch_class()];
        format!("{}{}{}", name, accidental, self.octave())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(Spelling::Sharps))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn labels_roundtrip_through_parser() {
        for midi in 0..128u8 {
            let note = Note::from_midi(midi);
            for &spelling in &[Spelling::Sharps, Spelling::Flats] {
                assert_eq!(Note::named_str(&note.label(spelling)), Some(note));
            }
        }
    }

    #[test]
    fn octave_boundaries() {
        assert_eq!(Note::named_str("B3"), Some(Note::from_midi(59)));
        assert_eq!(Note::named_str("Cb4"), Some(Note::from_midi(59)));
        assert_eq!(Note::named_str("B#3"), Some(Note::from_midi(60)));
        assert_eq!(Note::named_str("G9"), Some(Note::MAX));
        assert_eq!(Note::named_str("G#9"), None);
    }

    #[test]
    fn malformed_labels() {
        for label in &["", "C", "Cx4", "4C", "C#", "Cb-", "C4.5"] {
            assert_eq!(Note::named_str(label), None, "{:?}", label);
            match Note::parse(label) {
                Err(SonifyError::InvalidArgument { .. }) => {}
                other => panic!("unexpected {:?} for {:?}", other, label),
            }
        }
    }
}
