// sonify -- turning series of numbers into sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

// modules for making sounds
pub mod envelope;
pub mod key;
pub mod note;
pub mod oscillator;
pub mod soundmap;
pub mod tuning;
pub mod wave;

// Turning data into sound
pub mod output;
pub mod sonify;

// Utility modules
pub mod error;
pub mod util;

pub use error::SonifyError;
pub use sonify::Sonify;
