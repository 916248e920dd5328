// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The glue responsible for turning a series of numbers into a waveform.

use log::{debug, trace};

use crate::envelope::Envelope;
use crate::error::{Result, SonifyError};
use crate::note::Note;
use crate::oscillator::{self, WaveKind};
use crate::soundmap::{DiscreteNoteBins, SoundMap};
use crate::util;
use crate::wave::AudioBuffer;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Scale the values linearly into [0, 1], so that the minimum maps to 0 and the maximum to 1.
///
/// Data where all values are equal has no meaningful scale and is mapped to all ones.
///
/// # Examples
///
/// ```
/// use sonify::sonify::normalize;
///
/// assert_eq!(normalize(&[1.0, 2.0, 3.0]).unwrap(), vec![0.0, 0.5, 1.0]);
/// assert_eq!(normalize(&[-4.0, -4.0]).unwrap(), vec![1.0, 1.0]);
/// ```
pub fn normalize(values: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(SonifyError::invalid_argument(format!(
            "data must be finite, found {}",
            bad
        )));
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= f64::EPSILON * min.abs().max(max.abs()) {
        debug!("constant data ({}), normalizing to ones", min);
        return Ok(vec![1.0; values.len()]);
    }
    if !range.is_finite() {
        // The span of values near the ends of the f64 range overflows, halving is exact.
        let (low, span) = (min / 2.0, max / 2.0 - min / 2.0);
        return Ok(values.iter().map(|v| (v / 2.0 - low) / span).collect());
    }
    Ok(values.iter().map(|v| (v - min) / range).collect())
}

/// Like [`normalize`], for data given as a flat buffer in row-major order together with its shape.
/// Only one-dimensional shapes are accepted.
///
/// ```
/// use sonify::sonify::normalize_shaped;
///
/// assert!(normalize_shaped(&[3], &[1.0, 2.0, 3.0]).is_ok());
/// assert!(normalize_shaped(&[3, 1], &[1.0, 2.0, 3.0]).is_err());
/// ```
pub fn normalize_shaped(shape: &[usize], values: &[f64]) -> Result<Vec<f64>> {
    match shape {
        &[len] if len == values.len() => normalize(values),
        _ => Err(SonifyError::Shape {
            shape: shape.to_vec(),
        }),
    }
}

/// A sonification of one series of data.
///
/// The data is normalized once on construction. Notes, frequencies and waveforms are
/// derived from it on every call, except for [`Sonify::render`] which keeps its result
/// around for later inspection via [`Sonify::rendered`].
///
/// # Example
///
/// ```
/// use sonify::oscillator::WaveKind;
/// use sonify::sonify::Sonify;
///
/// let sonify = Sonify::new(&[3.0, 1.0, 2.0]).unwrap().with_sample_rate(8000).unwrap();
/// let labels = sonify.to_note_labels();
/// assert_eq!(labels, vec!["B4", "C4", "F4"]);
/// let wave = sonify.to_waveform(WaveKind::Sine, 0.5).unwrap();
/// assert_eq!(wave.len(), 3 * 4000);
/// ```
#[derive(Debug)]
pub struct Sonify {
    data: Vec<f64>,
    n_notes: usize,
    sound_map: Box<dyn SoundMap>,
    envelope: Envelope,
    sample_rate: u32,
    rendered: Option<AudioBuffer>,
}

impl Sonify {
    /// Sonify data with one octave of C major, the default envelope and 44.1 kHz.
    pub fn new(data: &[f64]) -> Result<Self> {
        let data = normalize(data)?;
        Ok(Self::from_normalized(data))
    }

    /// Sonify data given as a flat buffer together with its shape, see [`normalize_shaped`].
    pub fn from_shaped(shape: &[usize], values: &[f64]) -> Result<Self> {
        let data = normalize_shaped(shape, values)?;
        Ok(Self::from_normalized(data))
    }

    fn from_normalized(data: Vec<f64>) -> Self {
        Self {
            n_notes: data.len(),
            data,
            sound_map: Box::new(DiscreteNoteBins::default()),
            envelope: Envelope::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            rendered: None,
        }
    }

    pub fn with_sound_map<M: SoundMap + 'static>(mut self, sound_map: M) -> Self {
        self.sound_map = Box::new(sound_map);
        self
    }

    pub fn with_boxed_sound_map(mut self, sound_map: Box<dyn SoundMap>) -> Self {
        self.sound_map = sound_map;
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SonifyError::configuration("sample rate must be positive"));
        }
        self.sample_rate = sample_rate;
        Ok(self)
    }

    /// The normalized data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn note_count(&self) -> usize {
        self.n_notes
    }

    pub fn sound_map(&self) -> &dyn SoundMap {
        self.sound_map.as_ref()
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn to_frequencies(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|&v| self.sound_map.get_frequency(v))
            .collect()
    }

    pub fn to_notes(&self) -> Vec<Note> {
        self.data.iter().map(|&v| self.sound_map.get_note(v)).collect()
    }

    /// Note labels in the spelling of the sound map, e.g. `Bb4` for maps built from flat keys.
    pub fn to_note_labels(&self) -> Vec<String> {
        let spelling = self.sound_map.spelling();
        self.to_notes()
            .into_iter()
            .map(|note| note.label(spelling))
            .collect()
    }

    /// Play every data point as a note of `note_length` seconds, shaped by the envelope.
    ///
    /// The envelope is stretched to span the whole note, so that it reaches zero at the
    /// last sample of every note.
    pub fn to_waveform(&self, kind: WaveKind, note_length: f64) -> Result<AudioBuffer> {
        if !note_length.is_finite() || note_length < 0.0 {
            return Err(SonifyError::configuration(format!(
                "note length must be a non-negative duration, got {}",
                note_length
            )));
        }
        let sample_rate = self.sample_rate as f64;
        let n_samples = oscillator::sample_count(note_length, sample_rate);
        let total = self
            .n_notes
            .checked_mul(n_samples)
            .filter(|total| {
                total
                    .checked_mul(std::mem::size_of::<f64>())
                    .map_or(false, |bytes| bytes <= isize::MAX as usize)
            })
            .ok_or_else(|| {
                SonifyError::configuration(format!(
                    "{} notes of {} s at {} Hz do not fit into memory",
                    self.n_notes, note_length, self.sample_rate
                ))
            })?;
        let mut buffer = AudioBuffer::new(total, self.sample_rate);
        debug!(
            "rendering {} notes of {} samples as {} wave at {} Hz",
            self.n_notes, n_samples, kind, self.sample_rate
        );
        if n_samples == 0 {
            return Ok(buffer);
        }

        let times = util::linspace(0.0, self.envelope.note_length(), n_samples);
        let amplitudes = self.envelope.get_amplitudes(&times);

        for (i, (segment, &value)) in buffer
            .samples_mut()
            .chunks_exact_mut(n_samples)
            .zip(&self.data)
            .enumerate()
        {
            let frequency = self.sound_map.get_frequency(value);
            trace!("{:5}: {:.2} Hz", i, frequency);
            let wave = kind.render(frequency, note_length, sample_rate);
            for ((out, sample), amplitude) in segment.iter_mut().zip(&wave).zip(&amplitudes) {
                *out = sample * amplitude;
            }
        }
        Ok(buffer)
    }

    /// Render the waveform and keep it, see [`Sonify::rendered`].
    pub fn render(&mut self, kind: WaveKind, note_length: f64) -> Result<&AudioBuffer> {
        let buffer = self.to_waveform(kind, note_length)?;
        self.rendered = Some(buffer);
        self.rendered()
    }

    /// The waveform of the last call to [`Sonify::render`].
    ///
    /// Nothing is rendered implicitly: asking before rendering is an error.
    pub fn rendered(&self) -> Result<&AudioBuffer> {
        self.rendered.as_ref().ok_or(SonifyError::NotRendered {})
    }
}
