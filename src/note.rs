//! Note Names
//!
//! Spelled note names and their pitch classes (note identities modulo octave,
//! 0 = C through 11 = B). Parsing accepts any run of accidentals ("F#", "Ab",
//! "Cbb"); formatting always uses the canonical sharp spelling.

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Twelve chromatic pitch classes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NoteName {
    /// C
    C,
    /// C sharp / D flat
    Cs,
    /// D
    D,
    /// D sharp / E flat
    Ds,
    /// E
    E,
    /// F
    F,
    /// F sharp / G flat
    Fs,
    /// G
    G,
    /// G sharp / A flat
    Gs,
    /// A
    A,
    /// A sharp / B flat
    As,
    /// B
    B,
}

impl NoteName {
    /// Pitch class, 0 (C) through 11 (B).
    pub const fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Note name for a pitch class, or `None` when out of the 0..=11 range.
    pub const fn from_pitch_class(pitch_class: u8) -> Option<NoteName> {
        match pitch_class {
            0 => Some(NoteName::C),
            1 => Some(NoteName::Cs),
            2 => Some(NoteName::D),
            3 => Some(NoteName::Ds),
            4 => Some(NoteName::E),
            5 => Some(NoteName::F),
            6 => Some(NoteName::Fs),
            7 => Some(NoteName::G),
            8 => Some(NoteName::Gs),
            9 => Some(NoteName::A),
            10 => Some(NoteName::As),
            11 => Some(NoteName::B),
            _ => None,
        }
    }

    /// Canonical sharp spelling, e.g. "F#" for pitch class 6.
    pub const fn sharp_name(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::Cs => "C#",
            NoteName::D => "D",
            NoteName::Ds => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::Fs => "F#",
            NoteName::G => "G",
            NoteName::Gs => "G#",
            NoteName::A => "A",
            NoteName::As => "A#",
            NoteName::B => "B",
        }
    }
}

impl Display for NoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sharp_name())
    }
}

/// Error when parsing a spelled note name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized note name `{0}`")]
pub struct ParseNoteError(pub String);

impl FromStr for NoteName {
    type Err = ParseNoteError;

    /// Parse a letter A-G (either case) followed by `#` or `b` accidentals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(|| ParseNoteError(s.to_string()))?;
        let mut pitch_class: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(ParseNoteError(s.to_string())),
        };
        for accidental in chars {
            match accidental {
                '#' => pitch_class += 1,
                'b' => pitch_class -= 1,
                _ => return Err(ParseNoteError(s.to_string())),
            }
        }
        NoteName::from_pitch_class(pitch_class.rem_euclid(12) as u8)
            .ok_or_else(|| ParseNoteError(s.to_string()))
    }
}
