//! Utility functions that I don't know where to put else

/// Compute a factor measured in octaves (one octave corresponds to a factor of two).
///
/// # Example
///
/// ```
/// # use sonify::util::*;
///
/// assert_eq!(from_octaves(3.0), 8.0);
/// assert_eq!(from_octaves(-1.0), 0.5);
/// ```
pub fn from_octaves(octaves: f64) -> f64 {
    2.0f64.powf(octaves)
}

/// Compute a factor measured in semitones (one octave consists of 12 semitones)
///
/// # Example
///
/// ```
/// # use sonify::util::*;
///
/// assert_eq!(from_semitones(3.0), from_octaves(3.0 / 12.0));
/// ```
pub fn from_semitones(semitones: f64) -> f64 {
    2.0f64.powf(semitones / 12.0)
}

/// How many semitones a frequency factor spans, the inverse of [`from_semitones`].
pub fn to_semitones(factor: f64) -> f64 {
    12.0 * factor.log2()
}

/// `count` evenly spaced values from `start` to `end`, both ends included.
///
/// # Example
///
/// ```
/// # use sonify::util::*;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }
    let step = (end - start) / (count as f64 - 1.0);
    (0..count)
        .map(|i| {
            // pin the last value so that it does not suffer from rounding
            if i + 1 == count {
                end
            } else {
                start + step * i as f64
            }
        })
        .collect()
}
