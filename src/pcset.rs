//! Pitch Class Sets
//!
//! A pitch class set is a set (no repeats) of pitch classes — notes without
//! octaves. The primary representation is a 12-bit mask ([`Chroma`]): the bit
//! for pitch class 0 (C) is the most significant, so the mask's integer value
//! equals the set's "set number" and its binary string reads pitch class 0
//! first. Sets are useful to identify musical structures, e.g. two chords
//! with the same chroma are the same shape under different spellings.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::interval::Interval;
use crate::note::NoteName;

const SEMITONES: u32 = 12;

/// All twelve pitch-class bits.
const CHROMA_MASK: u16 = 0xFFF;

/// Values at or above this have pitch class 0 set (the chroma string starts
/// with '1').
const LEADING_BIT: u16 = 0x800;

/// Interval name from pitch class 0 to each of the twelve pitch classes.
const INTERVAL_NAMES: [&str; 12] = [
    "1P", "2m", "2M", "3m", "3M", "4P", "5d", "5P", "6m", "6M", "7m", "7M",
];

/// A 12-bit pitch-class bitmask.
///
/// Displays as a 12-character binary string where position `i` is '1' when
/// pitch class `i` is present: C major is "100010010000".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chroma(u16);

impl Chroma {
    /// The empty set.
    pub const EMPTY: Chroma = Chroma(0);

    /// Build from a set number (0..=4095); bits above the twelfth are
    /// discarded.
    pub const fn from_set_num(num: u16) -> Chroma {
        Chroma(num & CHROMA_MASK)
    }

    /// The chroma read as a 12-bit integer; unique id for the set.
    pub const fn set_num(self) -> u16 {
        self.0
    }

    /// Whether no pitch class is present.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the given pitch class is present.
    pub const fn contains(self, pitch_class: u8) -> bool {
        pitch_class < 12 && self.0 & (1 << (11 - pitch_class)) != 0
    }

    /// The set with the given pitch class added; out-of-range classes are
    /// ignored.
    pub const fn with(self, pitch_class: u8) -> Chroma {
        if pitch_class < 12 {
            Chroma(self.0 | 1 << (11 - pitch_class))
        } else {
            self
        }
    }

    /// Cyclic left rotation of the chroma string by `k` positions,
    /// reinterpreting pitch class `k` as the nominal root.
    pub const fn rotate(self, k: u32) -> Chroma {
        let k = k % SEMITONES;
        if k == 0 {
            self
        } else {
            Chroma(((self.0 << k) | (self.0 >> (SEMITONES - k))) & CHROMA_MASK)
        }
    }

    /// Encode a collection of notes; duplicates collapse.
    pub fn from_notes(notes: &[NoteName]) -> Chroma {
        notes
            .iter()
            .fold(Chroma::EMPTY, |chroma, note| chroma.with(note.pitch_class()))
    }

    /// Encode a collection of interval names; intervals that fail to parse
    /// contribute nothing to the mask.
    pub fn from_intervals<S: AsRef<str>>(intervals: &[S]) -> Chroma {
        intervals
            .iter()
            .filter_map(|name| Interval::parse(name.as_ref()).ok())
            .fold(Chroma::EMPTY, |chroma, interval| chroma.with(interval.chroma))
    }
}

impl Display for Chroma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:012b}", self.0)
    }
}

/// Error when parsing a chroma string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{0}` is not a 12-character binary chroma string")]
pub struct ParseChromaError(pub String);

impl FromStr for Chroma {
    type Err = ParseChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 12 || !s.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ParseChromaError(s.to_string()));
        }
        let num = u16::from_str_radix(s, 2).map_err(|_| ParseChromaError(s.to_string()))?;
        Ok(Chroma(num))
    }
}

/// A pitch-class-set descriptor: the chroma plus derived views of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcset {
    chroma: Chroma,
    normalized: Chroma,
    intervals: Vec<&'static str>,
}

impl Pcset {
    /// Build the descriptor for a chroma. Prefer [`PcsetCache`] when sets
    /// are constructed repeatedly.
    pub fn from_chroma(chroma: Chroma) -> Pcset {
        Pcset {
            chroma,
            normalized: normalize(chroma),
            intervals: (0..12)
                .filter(|&pc| chroma.contains(pc))
                .map(|pc| INTERVAL_NAMES[pc as usize])
                .collect(),
        }
    }

    /// The set's chroma.
    pub fn chroma(&self) -> Chroma {
        self.chroma
    }

    /// The chroma read as a 12-bit integer.
    pub fn set_num(&self) -> u16 {
        self.chroma.set_num()
    }

    /// Canonical rotation used for set identity comparisons.
    pub fn normalized(&self) -> Chroma {
        self.normalized
    }

    /// Ascending interval names from pitch class 0 to each present pitch
    /// class.
    pub fn intervals(&self) -> &[&'static str] {
        &self.intervals
    }

    /// Whether the set contains no pitch classes.
    pub fn is_empty(&self) -> bool {
        self.chroma.is_empty()
    }
}

/// Pick the canonical rotation of a chroma.
///
/// Among rotations that start with '1', a candidate replaces the tracked
/// minimum when it is strictly smaller or the tracked minimum is still below
/// 2048; a final minimum below 2048 falls back to the original value.
/// Chord identities depend on the exact canonical forms this comparison
/// picks, so the bias is kept as-is.
fn normalize(chroma: Chroma) -> Chroma {
    let set_num = chroma.set_num();
    let mut best = set_num;
    for k in 0..SEMITONES {
        let rotated = chroma.rotate(k).set_num();
        if rotated >= LEADING_BIT && (rotated < best || best < LEADING_BIT) {
            best = rotated;
        }
    }
    if best < LEADING_BIT {
        best = set_num;
    }
    Chroma::from_set_num(best)
}

/// Memoizes [`Pcset`] construction, keyed by chroma.
///
/// Note-derived and interval-derived sets share the map, so encoding
/// {C, E, G} and "1P 3M 5P" converge to the same cached value.
#[derive(Debug, Clone, Default)]
pub struct PcsetCache {
    sets: HashMap<Chroma, Pcset>,
}

impl PcsetCache {
    /// An empty cache.
    pub fn new() -> PcsetCache {
        PcsetCache::default()
    }

    /// The pcset for a chroma, built on first use.
    pub fn get(&mut self, chroma: Chroma) -> &Pcset {
        self.sets
            .entry(chroma)
            .or_insert_with(|| Pcset::from_chroma(chroma))
    }

    /// The pcset of a note collection.
    pub fn from_notes(&mut self, notes: &[NoteName]) -> &Pcset {
        self.get(Chroma::from_notes(notes))
    }

    /// The pcset of an interval-name collection.
    pub fn from_intervals<S: AsRef<str>>(&mut self, intervals: &[S]) -> &Pcset {
        self.get(Chroma::from_intervals(intervals))
    }

    /// All rotations of the note set's chroma in order k = 0..11, e.g. the
    /// modes of a scale. With `normalize` set, rotations that do not start
    /// with '1' are discarded.
    pub fn modes(&mut self, notes: &[NoteName], normalize: bool) -> Vec<Chroma> {
        let chroma = self.from_notes(notes).chroma();
        (0..SEMITONES)
            .map(|k| chroma.rotate(k))
            .filter(|rotation| !normalize || rotation.set_num() >= LEADING_BIT)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(names: &[&str]) -> Vec<NoteName> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    #[test]
    fn chroma_string_is_twelve_binary_chars() {
        let chroma = Chroma::from_notes(&notes(&["C", "E", "G"]));
        let text = chroma.to_string();
        assert_eq!(text.len(), 12);
        assert!(text.bytes().all(|b| b == b'0' || b == b'1'));
        assert_eq!(text, "100010010000");
    }

    #[test]
    fn set_num_matches_binary_reading() {
        for input in [&["C", "E", "G"][..], &["D", "F#", "A", "C"][..], &[][..]] {
            let chroma = Chroma::from_notes(&notes(input));
            assert_eq!(
                chroma.set_num(),
                u16::from_str_radix(&chroma.to_string(), 2).unwrap()
            );
            assert_eq!(chroma.to_string().parse::<Chroma>(), Ok(chroma));
        }
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let mut cache = PcsetCache::new();
        let pcset = cache.from_notes(&[]);
        assert!(pcset.is_empty());
        assert_eq!(pcset.chroma(), Chroma::EMPTY);
        assert_eq!(pcset.chroma().to_string(), "000000000000");
        assert!(pcset.intervals().is_empty());
    }

    #[test]
    fn unparseable_intervals_are_skipped() {
        let with_garbage = Chroma::from_intervals(&["1P", "wat", "5P"]);
        let clean = Chroma::from_intervals(&["1P", "5P"]);
        assert_eq!(with_garbage, clean);
    }

    #[test]
    fn notes_and_intervals_converge_in_cache() {
        let mut cache = PcsetCache::new();
        let from_notes = cache.from_notes(&notes(&["C", "E", "G"])).clone();
        let from_intervals = cache.from_intervals(&["1P", "3M", "5P"]).clone();
        assert_eq!(from_notes, from_intervals);
        assert_eq!(from_notes.intervals(), &["1P", "3M", "5P"]);
    }

    #[test]
    fn rotation_is_cyclic() {
        let chroma = Chroma::from_notes(&notes(&["C", "E", "G"]));
        assert_eq!(chroma.rotate(0), chroma);
        assert_eq!(chroma.rotate(12), chroma);
        assert_eq!(chroma.rotate(4).to_string(), "100100001000");
        assert_eq!(chroma.rotate(7).rotate(5), chroma);
    }

    #[test]
    fn modes_returns_all_rotations() {
        let mut cache = PcsetCache::new();
        let all = cache.modes(&notes(&["C", "E", "G"]), false);
        assert_eq!(all.len(), 12);
        assert_eq!(all[0].to_string(), "100010010000");
        assert_eq!(all[4].to_string(), "100100001000");

        let normalized = cache.modes(&notes(&["C", "E", "G"]), true);
        assert_eq!(normalized.len(), 3);
        assert!(normalized.iter().all(|c| c.to_string().starts_with('1')));
    }

    #[test]
    fn normalization_bias_is_preserved() {
        // The major triad normalizes to its third rotation, not the
        // numerically smallest one.
        let major = Chroma::from_intervals(&["1P", "3M", "5P"]);
        assert_eq!(Pcset::from_chroma(major).normalized().to_string(), "100001000100");
        assert_eq!(
            Pcset::from_chroma(Chroma::EMPTY).normalized(),
            Chroma::EMPTY
        );
    }

    #[test]
    fn contains_and_with() {
        let chroma = Chroma::EMPTY.with(0).with(7).with(13);
        assert!(chroma.contains(0));
        assert!(chroma.contains(7));
        assert!(!chroma.contains(4));
        assert!(!chroma.contains(13));
        assert_eq!(chroma.set_num(), 0b1000_0001_0000);
    }
}
