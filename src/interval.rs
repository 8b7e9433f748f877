//! Interval Parser
//!
//! Converts textual interval notation into a structured [`Interval`]. Both
//! tonal notation ("3M", "-2m": number then quality) and shorthand notation
//! ("M3", "m-2": quality then number) are accepted.

use std::fmt::Display;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Semitone size of each natural scale degree, unison through seventh.
const BASE_SIZES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Natural quality per scale degree: unisons, fourths, fifths and octaves
/// are perfectable, the rest are majorable.
const BASE_KINDS: [IntervalType; 7] = [
    IntervalType::Perfectable,
    IntervalType::Majorable,
    IntervalType::Majorable,
    IntervalType::Perfectable,
    IntervalType::Perfectable,
    IntervalType::Majorable,
    IntervalType::Majorable,
];

// Tonal notation first, shorthand second; groups 1/2 vs 3/4.
static NOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([-+]?\d+)(d{1,4}|m|M|P|A{1,4})|(A{1,4}|P|M|m|d{1,4})([-+]?\d+))$")
        .expect("interval notation pattern is valid")
});

/// Errors when parsing interval notation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIntervalError {
    /// The text matched neither tonal nor shorthand notation, or its
    /// number was zero or out of range.
    #[error("invalid interval notation `{0}`")]
    Notation(String),

    /// The quality cannot be applied to the interval's degree, e.g. a
    /// perfect third or a major fifth.
    #[error("quality `{quality}` cannot be applied to degree {number}")]
    QualityMismatch {
        /// The offending quality.
        quality: Quality,
        /// The signed degree number it was paired with.
        number: i32,
    },
}

/// Interval quality, from quadruply diminished to quadruply augmented
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Quality {
    /// `d`, `dd`, `ddd` or `dddd`
    Diminished(u8),
    /// `m`
    Minor,
    /// `M`
    Major,
    /// `P`
    Perfect,
    /// `A`, `AA`, `AAA` or `AAAA`
    Augmented(u8),
}

impl Quality {
    fn from_token(token: &str) -> Option<Quality> {
        match token {
            "P" => Some(Quality::Perfect),
            "M" => Some(Quality::Major),
            "m" => Some(Quality::Minor),
            _ if (1..=4).contains(&token.len()) => {
                if token.bytes().all(|b| b == b'd') {
                    Some(Quality::Diminished(token.len() as u8))
                } else if token.bytes().all(|b| b == b'A') {
                    Some(Quality::Augmented(token.len() as u8))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Diminished(n) => write!(f, "{}", "d".repeat(usize::from(*n))),
            Quality::Minor => f.write_str("m"),
            Quality::Major => f.write_str("M"),
            Quality::Perfect => f.write_str("P"),
            Quality::Augmented(n) => write!(f, "{}", "A".repeat(usize::from(*n))),
        }
    }
}

/// Whether a scale degree takes perfect or major as its natural quality
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntervalType {
    /// Degrees 1, 4, 5 and 8: natural quality is perfect.
    Perfectable,
    /// Degrees 2, 3, 6 and 7: natural quality is major.
    Majorable,
}

/// A parsed musical interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Canonical name, number before quality ("4d", "-2M").
    pub name: String,
    /// Signed scale-degree distance; never zero.
    pub number: i32,
    /// Parsed quality.
    pub quality: Quality,
    /// Whether the degree is perfectable or majorable.
    pub kind: IntervalType,
    /// Scale step 0..=6, `(|number| - 1) % 7`.
    pub step: usize,
    /// Deviation in semitones from the degree's natural quality.
    pub alteration: i32,
    /// Octave-reduced degree preserving sign; octaves stay ±8.
    pub simple: i32,
    /// Signed absolute distance in semitones.
    pub semitones: i32,
    /// Direction-normalized pitch-class distance, 0..=11.
    pub chroma: u8,
    /// Number of whole octaves spanned.
    pub octave: i32,
}

impl Interval {
    /// Parse interval notation.
    ///
    /// ```rust
    /// use chord_namer::Interval;
    ///
    /// let fourth = Interval::parse("P4")?;
    /// assert_eq!(fourth.name, "4P");
    /// assert_eq!(fourth.semitones, 5);
    /// assert!(Interval::parse("2P").is_err());
    /// # Ok::<(), chord_namer::ParseIntervalError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Interval, ParseIntervalError> {
        let (number, quality_token) =
            tokenize(text).ok_or_else(|| ParseIntervalError::Notation(text.to_string()))?;
        if number == 0 {
            return Err(ParseIntervalError::Notation(text.to_string()));
        }
        let quality = Quality::from_token(quality_token)
            .ok_or_else(|| ParseIntervalError::Notation(text.to_string()))?;

        let abs = i64::from(number).abs();
        let step = ((abs - 1) % 7) as usize;
        let kind = BASE_KINDS[step];
        let alteration = quality_to_alteration(kind, quality)
            .ok_or(ParseIntervalError::QualityMismatch { quality, number })?;

        let direction = if number < 0 { -1 } else { 1 };
        let octave = (abs - 1) / 7;
        let semitones = i64::from(direction)
            * (i64::from(BASE_SIZES[step]) + i64::from(alteration) + 12 * octave);
        let semitones = i32::try_from(semitones)
            .map_err(|_| ParseIntervalError::Notation(text.to_string()))?;
        let chroma = (direction * (BASE_SIZES[step] + alteration)).rem_euclid(12) as u8;
        let simple = if abs == 8 {
            number
        } else {
            direction * (step as i32 + 1)
        };

        Ok(Interval {
            name: format!("{number}{quality}"),
            number,
            quality,
            kind,
            step,
            alteration,
            simple,
            semitones,
            chroma,
            octave: octave as i32,
        })
    }
}

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::parse(s)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Split interval notation into its signed number and quality token.
fn tokenize(text: &str) -> Option<(i32, &str)> {
    let captures = NOTATION.captures(text)?;
    let (number, quality) = match (captures.get(1), captures.get(3)) {
        (Some(number), _) => (number, captures.get(2)?),
        (None, Some(quality)) => (captures.get(4)?, quality),
        (None, None) => return None,
    };
    let number = number.as_str().parse().ok()?;
    Some((number, quality.as_str()))
}

/// Semitone offset of a quality from the degree's natural quality, or `None`
/// for combinations that do not exist (major perfectable, perfect majorable).
fn quality_to_alteration(kind: IntervalType, quality: Quality) -> Option<i32> {
    match (kind, quality) {
        (_, Quality::Augmented(n)) => Some(i32::from(n)),
        (IntervalType::Perfectable, Quality::Diminished(n)) => Some(-i32::from(n)),
        (IntervalType::Majorable, Quality::Diminished(n)) => Some(-(i32::from(n) + 1)),
        (IntervalType::Perfectable, Quality::Perfect) => Some(0),
        (IntervalType::Majorable, Quality::Major) => Some(0),
        (IntervalType::Majorable, Quality::Minor) => Some(-1),
        _ => None,
    }
}
