// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `sonify` reads a column of numbers and plays it, or writes it to an audio file.

use std::convert::TryFrom;
use std::io::{self, Read};
use std::path::PathBuf;

use log::{error, info};
use structopt::StructOpt;

use sonify::envelope::ADSR;
use sonify::oscillator::WaveKind;
use sonify::output;
use sonify::soundmap::{DiscreteNoteBins, PitchGlide, SoundMap};
use sonify::{Sonify, SonifyError};

#[derive(Debug, StructOpt)]
#[structopt(name = "sonify", about = "Turning series of numbers into sound")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Text file with one number per line. Read from stdin if not given.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output file (any sox-supported format). Sound is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Wave shape, one of sine, square or sawtooth.
    #[structopt(short, long, default_value = "sine")]
    wave: WaveKind,

    /// Length of every note in seconds.
    #[structopt(short = "l", long, default_value = "0.25")]
    note_length: f64,

    #[structopt(short = "r", long, default_value = "44100")]
    sample_rate: u32,

    /// Musical key as `<TONIC>:<mode>`, e.g. `A#:min` or `D:dorian` [default: C:maj].
    #[structopt(short, long)]
    key: Option<String>,

    /// Inclusive range of octaves of the key, e.g. `3..5` [default: 4..4].
    #[structopt(long, parse(try_from_str = parse_int_range))]
    octaves: Option<(i64, i64)>,

    /// Use all semitones between two MIDI notes instead of a key, e.g. `60..72`.
    #[structopt(
        long,
        conflicts_with_all = &["notes", "key", "octaves"],
        parse(try_from_str = parse_int_range)
    )]
    midi: Option<(i64, i64)>,

    /// Use all semitones between two named notes instead of a key, e.g. `C4..C5`.
    #[structopt(
        long,
        conflicts_with_all = &["key", "octaves"],
        parse(try_from_str = parse_range)
    )]
    notes: Option<(String, String)>,

    /// Glide continuously between the lowest and the highest note instead of using discrete notes.
    #[structopt(long)]
    glide: bool,

    /// Envelope attack in seconds of envelope time.
    #[structopt(long)]
    attack: Option<f64>,

    #[structopt(long)]
    decay: Option<f64>,

    #[structopt(long)]
    release: Option<f64>,

    /// Envelope amplitude held between decay and release.
    #[structopt(long)]
    sustain: Option<f64>,

    /// Envelope amplitude at the start of every note.
    #[structopt(long)]
    start: Option<f64>,

    /// Total envelope time the other envelope durations are relative to.
    #[structopt(long)]
    envelope_length: Option<f64>,

    /// Print the notes the data maps to instead of making sound.
    #[structopt(long)]
    dump_notes: bool,
}

fn parse_range(input: &str) -> Result<(String, String), String> {
    let mut parts = input.splitn(2, "..");
    match (parts.next(), parts.next()) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
            Ok((start.to_string(), end.to_string()))
        }
        _ => Err(format!("expected a range like `start..end`, got {:?}", input)),
    }
}

fn parse_int_range(input: &str) -> Result<(i64, i64), String> {
    let (start, end) = parse_range(input)?;
    let parse = |s: &str| s.trim().parse::<i64>().map_err(|err| format!("{:?}: {}", s, err));
    Ok((parse(&start)?, parse(&end)?))
}

/// Parse one number per line, ignoring blank lines and `#` comments.
/// Lines with several columns make the data two-dimensional, which is rejected.
fn parse_series(text: &str) -> Result<Vec<f64>, SonifyError> {
    let rows = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(|ch: char| ch == ',' || ch.is_whitespace())
                .filter(|col| !col.is_empty())
                .map(|col| {
                    col.parse::<f64>().map_err(|_| SonifyError::InvalidArgument {
                        message: format!("not a number: {:?}", col),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let columns = rows.iter().map(Vec::len).max().unwrap_or(1);
    if columns != 1 {
        return Err(SonifyError::Shape {
            shape: vec![rows.len(), columns],
        });
    }
    Ok(rows.into_iter().flatten().collect())
}

fn sound_map(opt: &Opt) -> Result<Box<dyn SoundMap>, SonifyError> {
    let bins = if let Some((start, end)) = opt.midi {
        DiscreteNoteBins::from_midi(start, end)?
    } else if let Some((start, end)) = &opt.notes {
        DiscreteNoteBins::from_note_names(start, end)?
    } else {
        let (low, high) = opt.octaves.unwrap_or((4, 4));
        let out_of_range = |octave: i64| SonifyError::InvalidArgument {
            message: format!("octave {} is out of range", octave),
        };
        let low = i32::try_from(low).map_err(|_| out_of_range(low))?;
        let high = i32::try_from(high).map_err(|_| out_of_range(high))?;
        DiscreteNoteBins::from_key(opt.key.as_deref().unwrap_or("C:maj"), (low, high))?
    };

    if opt.glide {
        let notes = bins.notes();
        Ok(Box::new(PitchGlide::new(notes[0], notes[notes.len() - 1])?))
    } else {
        Ok(Box::new(bins))
    }
}

fn envelope(opt: &Opt) -> ADSR {
    let defaults = ADSR::default();
    ADSR {
        attack: opt.attack.unwrap_or(defaults.attack),
        decay: opt.decay.unwrap_or(defaults.decay),
        release: opt.release.unwrap_or(defaults.release),
        note_length: opt.envelope_length.unwrap_or(defaults.note_length),
        start: opt.start.unwrap_or(defaults.start),
        sustain: opt.sustain.unwrap_or(defaults.sustain),
    }
}

fn run(opt: Opt) -> Result<(), SonifyError> {
    let text = match &opt.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let data = parse_series(&text)?;
    info!("read {} values", data.len());

    let envelope = envelope(&opt).build()?;
    let map = sound_map(&opt)?;
    let sonify = Sonify::new(&data)?
        .with_boxed_sound_map(map)
        .with_envelope(envelope)
        .with_sample_rate(opt.sample_rate)?;

    if opt.dump_notes {
        for label in sonify.to_note_labels() {
            println!("{}", label);
        }
        return Ok(());
    }

    let wave = sonify.to_waveform(opt.wave, opt.note_length)?;
    output::sox::output(&wave, opt.output.as_deref())
}

fn main() {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    if let Err(err) = run(opt) {
        error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn series() {
        let text = "
            # temperature
            1.5
            -2

            3e2 # peak
        ";
        assert_eq!(parse_series(text).unwrap(), vec![1.5, -2.0, 300.0]);
        assert!(parse_series("").unwrap().is_empty());
    }

    #[test]
    fn series_errors() {
        match parse_series("1 2\n3 4\n5 6") {
            Err(SonifyError::Shape { shape }) => assert_eq!(shape, vec![3, 2]),
            other => panic!("unexpected {:?}", other),
        }
        match parse_series("1\nabc") {
            Err(SonifyError::InvalidArgument { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ranges() {
        assert_eq!(parse_int_range("4..5"), Ok((4, 5)));
        assert_eq!(parse_int_range("-1..2"), Ok((-1, 2)));
        assert_eq!(
            parse_range("C4..C5"),
            Ok(("C4".to_string(), "C5".to_string()))
        );
        assert!(parse_range("C4").is_err());
        assert!(parse_range("..C5").is_err());
        assert!(parse_int_range("a..2").is_err());
    }

    #[test]
    fn options() {
        let opt = Opt::from_iter(&["sonify", "--midi", "60..72", "--glide", "--sustain", "0.5"]);
        assert_eq!(sound_map(&opt).unwrap().notes().len(), 13);
        assert_eq!(envelope(&opt).sustain, 0.5);

        let opt = Opt::from_iter(&["sonify", "--key", "B:min", "--octaves", "3..4"]);
        assert_eq!(sound_map(&opt).unwrap().notes().len(), 14);

        let opt = Opt::from_iter(&["sonify", "--octaves", "5..4"]);
        assert!(sound_map(&opt).is_err());

        assert!(Opt::from_iter_safe(&["sonify", "--wave", "triangle"]).is_err());
    }

    #[test]
    fn note_sources_are_exclusive() {
        let default = Opt::from_iter(&["sonify"]);
        assert_eq!(sound_map(&default).unwrap().notes().len(), 7);

        for args in &[
            &["sonify", "--key", "B:min", "--midi", "60..72"][..],
            &["sonify", "--octaves", "3..4", "--midi", "60..72"][..],
            &["sonify", "--key", "B:min", "--notes", "C4..C5"][..],
            &["sonify", "--octaves", "3..4", "--notes", "C4..C5"][..],
            &["sonify", "--midi", "60..72", "--notes", "C4..C5"][..],
        ] {
            assert!(Opt::from_iter_safe(*args).is_err(), "accepted {:?}", args);
        }
    }
}
