// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Mapping normalized values in [0, 1] to notes and frequencies.

use std::fmt;

use log::debug;

use crate::error::{Result, SonifyError};
use crate::key::Key;
use crate::note::{Note, Spelling};
use crate::tuning::Tuning;
use crate::util;

/// How far the outermost bin edges are pushed beyond [0, 1],
/// so that values of exactly 0.0 and 1.0 fall into the first and last bin.
pub const EDGE_EPSILON: f64 = 0.001;

/// Assigns a note and a frequency to every normalized value.
pub trait SoundMap: fmt::Debug {
    fn get_note(&self, value: f64) -> Note;

    fn get_frequency(&self, value: f64) -> f64;

    /// All notes the map can produce, ascending in pitch.
    fn notes(&self) -> &[Note];

    /// Frequencies of [`SoundMap::notes`], in the same order.
    fn frequencies(&self) -> &[f64];

    /// How notes should be written when turned into labels.
    fn spelling(&self) -> Spelling {
        Spelling::Sharps
    }
}

/// Splits [0, 1] into equally sized bins, one for each note.
///
/// ```text
/// [0, 1/3) [1/3, 2/3) [2/3, 1]
///    A         B          C
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteNoteBins {
    notes: Vec<Note>,
    frequencies: Vec<f64>,
    edges: Vec<f64>,
    spelling: Spelling,
}

impl Default for DiscreteNoteBins {
    /// One octave of C major starting at middle C.
    fn default() -> Self {
        let notes = [60, 62, 64, 65, 67, 69, 71]
            .iter()
            .map(|&midi| Note::from_midi(midi))
            .collect::<Vec<_>>();
        Self::build(notes, Spelling::Sharps)
    }
}

impl DiscreteNoteBins {
    /// Create bins for the given notes, ordered by pitch.
    /// Notes occurring more than once only get a single bin.
    pub fn new(notes: Vec<Note>) -> Result<Self> {
        if notes.is_empty() {
            return Err(SonifyError::invalid_argument(
                "a sound map needs at least one note",
            ));
        }
        Ok(Self::build(notes, Spelling::Sharps))
    }

    fn build(mut notes: Vec<Note>, spelling: Spelling) -> Self {
        let tuning = Tuning::default();
        notes.sort();
        notes.dedup();
        let frequencies = notes.iter().map(|&note| tuning.frequency(note)).collect();
        let edges = Self::construct_edges(notes.len());
        debug!(
            "built {} note bins from {} to {}",
            notes.len(),
            notes[0].label(spelling),
            notes[notes.len() - 1].label(spelling)
        );
        Self {
            notes,
            frequencies,
            edges,
            spelling,
        }
    }

    /// All notes of a key spanning the inclusive range of octaves.
    ///
    /// ```
    /// # use sonify::soundmap::*;
    /// let map = DiscreteNoteBins::from_key("C:maj", (4, 4)).unwrap();
    /// assert_eq!(map.notes().len(), 7);
    /// assert_eq!(map.edges().len(), 8);
    /// ```
    pub fn from_key(key: &str, octave_range: (i32, i32)) -> Result<Self> {
        let key: Key = key.parse()?;
        let notes = key.notes(octave_range.0, octave_range.1)?;
        Ok(Self::build(notes, key.spelling()))
    }

    /// Every semitone between the two MIDI notes, both included.
    ///
    /// ```
    /// # use sonify::soundmap::*;
    /// let map = DiscreteNoteBins::from_midi(60, 72).unwrap();
    /// assert_eq!(map.notes().len(), 13);
    /// assert!(DiscreteNoteBins::from_midi(72, 60).is_err());
    /// ```
    pub fn from_midi(start: i64, end: i64) -> Result<Self> {
        if end < start {
            return Err(SonifyError::Range {
                what: "MIDI",
                start,
                end,
            });
        }
        let out_of_range = |midi| {
            SonifyError::invalid_argument(format!("MIDI note {} is outside of 0 - 127", midi))
        };
        let first = Note::try_from_midi(start).ok_or_else(|| out_of_range(start))?;
        let last = Note::try_from_midi(end).ok_or_else(|| out_of_range(end))?;
        let notes = (first.to_midi()..=last.to_midi()).map(Note::from_midi).collect();
        Ok(Self::build(notes, Spelling::Sharps))
    }

    /// Every semitone between two notes given by name, e.g. `"C4"` and `"C5"`.
    pub fn from_note_names(start: &str, end: &str) -> Result<Self> {
        let first = Note::parse(start)?;
        let last = Note::parse(end)?;
        Self::from_midi(first.to_midi() as i64, last.to_midi() as i64)
    }

    /// N + 1 evenly spaced edges with the outermost ones nudged outwards.
    fn construct_edges(n_notes: usize) -> Vec<f64> {
        let mut edges = util::linspace(0.0, 1.0, n_notes + 1);
        edges[0] -= EDGE_EPSILON;
        edges[n_notes] += EDGE_EPSILON;
        edges
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Index of the bin containing `value`.
    ///
    /// Like a left-sided binary search, a value lying exactly on an inner edge
    /// belongs to the lower bin. Values beyond the outer edges go to the first or last bin.
    pub fn bin_index(&self, value: f64) -> usize {
        let insertion = self.edges.partition_point(|&edge| edge < value);
        insertion.saturating_sub(1).min(self.notes.len() - 1)
    }
}

impl SoundMap for DiscreteNoteBins {
    fn get_note(&self, value: f64) -> Note {
        self.notes[self.bin_index(value)]
    }

    fn get_frequency(&self, value: f64) -> f64 {
        self.frequencies[self.bin_index(value)]
    }

    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    fn spelling(&self) -> Spelling {
        self.spelling
    }
}

/// Glides continuously between two notes, so that equal steps in value
/// correspond to equal musical intervals.
///
/// ```
/// # use sonify::soundmap::*;
/// # use sonify::note::Note;
/// let glide = PitchGlide::new(Note::from_midi(57), Note::from_midi(81)).unwrap();
/// assert_eq!(glide.get_frequency(0.0), 220.0);
/// assert_eq!(glide.get_frequency(0.5), 440.0);
/// assert_eq!(glide.get_note(0.5), Note::from_midi(69));
/// ```
#[derive(Debug, Clone)]
pub struct PitchGlide {
    notes: Vec<Note>,
    frequencies: Vec<f64>,
    tuning: Tuning,
}

impl PitchGlide {
    pub fn new(low: Note, high: Note) -> Result<Self> {
        if high < low {
            return Err(SonifyError::Range {
                what: "glide",
                start: low.index() as i64,
                end: high.index() as i64,
            });
        }
        let tuning = Tuning::default();
        let notes: Vec<Note> = (low.to_midi()..=high.to_midi()).map(Note::from_midi).collect();
        let frequencies = notes.iter().map(|&note| tuning.frequency(note)).collect();
        Ok(Self {
            notes,
            frequencies,
            tuning,
        })
    }

    fn semitones(&self, value: f64) -> f64 {
        let low = self.notes[0].index() as f64;
        let high = self.notes[self.notes.len() - 1].index() as f64;
        low + value.max(0.0).min(1.0) * (high - low)
    }
}

impl SoundMap for PitchGlide {
    fn get_note(&self, value: f64) -> Note {
        let index = self.semitones(value).round() as usize - self.notes[0].to_midi() as usize;
        self.notes[index.min(self.notes.len() - 1)]
    }

    fn get_frequency(&self, value: f64) -> f64 {
        let offset = self.semitones(value) - self.tuning.reference_note.index() as f64;
        self.tuning.reference_frequency * util::from_semitones(offset)
    }

    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const KEYS: [&str; 4] = ["A#:min", "B:min", "C:maj", "F#:chromatic"];

    fn maps() -> Vec<DiscreteNoteBins> {
        let mut maps = Vec::new();
        for key in &KEYS {
            for &range in &[(4, 4), (4, 5), (3, 5)] {
                maps.push(DiscreteNoteBins::from_key(key, range).unwrap());
            }
        }
        maps.push(DiscreteNoteBins::from_midi(60, 72).unwrap());
        maps.push(DiscreteNoteBins::from_midi(60, 60).unwrap());
        maps.push(DiscreteNoteBins::default());
        maps
    }

    #[test]
    fn note_counts() {
        for key in &KEYS[..3] {
            assert_eq!(DiscreteNoteBins::from_key(key, (4, 4)).unwrap().notes().len(), 7);
            assert_eq!(DiscreteNoteBins::from_key(key, (4, 5)).unwrap().notes().len(), 14);
            assert_eq!(DiscreteNoteBins::from_key(key, (3, 5)).unwrap().notes().len(), 21);
        }
        for octaves in 1..4 {
            let map = DiscreteNoteBins::from_key("C:chrom", (3, 3 + octaves - 1)).unwrap();
            assert_eq!(map.notes().len(), 12 * octaves as usize);
            assert_eq!(map.edges().len(), 12 * octaves as usize + 1);
        }
    }

    #[test]
    fn bins_are_ordered() {
        for map in maps() {
            assert_eq!(map.edges().len(), map.notes().len() + 1);
            assert_eq!(map.frequencies().len(), map.notes().len());
            assert!(map.edges()[0] < 0.0);
            assert!(map.edges()[map.notes().len()] > 1.0);
            assert!(map.edges().windows(2).all(|w| w[0] < w[1]));
            assert!(map.frequencies().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn boundary_values() {
        for map in maps() {
            let n = map.notes().len();
            assert_eq!(map.get_note(0.0), map.notes()[0]);
            assert_eq!(map.get_note(1.0), map.notes()[n - 1]);
            assert_eq!(map.get_note(1.0 + 1e-15), map.notes()[n - 1]);
            assert_eq!(map.get_note(2.0), map.notes()[n - 1]);
            assert_eq!(map.get_note(-1.0), map.notes()[0]);
            assert_eq!(map.get_frequency(1.0), map.frequencies()[n - 1]);
        }
    }

    #[test]
    fn inner_edges_belong_to_lower_bin() {
        let map = DiscreteNoteBins::from_midi(60, 61).unwrap();
        assert_eq!(map.get_note(0.5), Note::from_midi(60));
        assert_eq!(map.get_note(0.500001), Note::from_midi(61));
        assert_eq!(map.get_note(0.25), Note::from_midi(60));
    }

    #[test]
    fn default_is_c_major() {
        let map = DiscreteNoteBins::default();
        let labels: Vec<_> = map.notes().iter().map(|n| n.to_string()).collect();
        assert_eq!(labels, vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4"]);
        let from_key = DiscreteNoteBins::from_key("C:maj", (4, 4)).unwrap();
        assert_eq!(map.notes(), from_key.notes());
        assert_eq!(map.edges(), from_key.edges());
    }

    #[test]
    fn construction_errors() {
        match DiscreteNoteBins::from_midi(72, 60) {
            Err(SonifyError::Range { start: 72, end: 60, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(DiscreteNoteBins::from_midi(120, 128).is_err());
        assert!(DiscreteNoteBins::from_midi(-1, 10).is_err());
        assert!(DiscreteNoteBins::new(vec![]).is_err());
        match DiscreteNoteBins::from_note_names("C5", "C4") {
            Err(SonifyError::Range { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match DiscreteNoteBins::from_note_names("C4", "X5") {
            Err(SonifyError::InvalidArgument { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match DiscreteNoteBins::from_key("C:maj", (5, 4)) {
            Err(SonifyError::Range { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn note_names() {
        let map = DiscreteNoteBins::from_note_names("C4", "C5").unwrap();
        let midi = DiscreteNoteBins::from_midi(60, 72).unwrap();
        assert_eq!(map.notes(), midi.notes());
    }

    #[test]
    fn unsorted_notes() {
        let map = DiscreteNoteBins::new(vec![
            Note::from_midi(67),
            Note::from_midi(60),
            Note::from_midi(64),
            Note::from_midi(60),
        ])
        .unwrap();
        let midi: Vec<_> = map.notes().iter().map(|n| n.to_midi()).collect();
        assert_eq!(midi, vec![60, 64, 67]);
    }

    #[test]
    fn glide() {
        let glide = PitchGlide::new(Note::from_midi(60), Note::from_midi(72)).unwrap();
        assert_eq!(glide.notes().len(), 13);
        assert!((glide.get_frequency(1.0) - 2.0 * glide.get_frequency(0.0)).abs() < 1e-9);
        assert_eq!(glide.get_note(0.0), Note::from_midi(60));
        assert_eq!(glide.get_note(1.0), Note::from_midi(72));
        assert_eq!(glide.get_note(1.5), Note::from_midi(72));
        assert!(glide.get_frequency(0.3) < glide.get_frequency(0.31));
        assert!(PitchGlide::new(Note::from_midi(72), Note::from_midi(60)).is_err());
    }
}
