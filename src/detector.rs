//! Chord Detector
//!
//! Names the chords implied by an unordered set of notes. Every rotation of
//! the input's pitch-class set is matched against the dictionary; the first
//! note is taken as the tonic, and matches whose root differs from it are
//! reported as inversions ("D7/F#") at half weight.

use once_cell::sync::Lazy;

use crate::chord_type::ChordDictionary;
use crate::note::NoteName;
use crate::pcset::{Chroma, PcsetCache};

// 3m 000100000000
// 3M 000010000000
const ANY_THIRD_MASK: u16 = 0b0001_1000_0000;
// 5P 000000010000
const PERFECT_FIFTH_MASK: u16 = 0b0000_0001_0000;
// 5d 000000100000
// 5A 000000001000
const NON_PERFECT_FIFTH_MASK: u16 = 0b0000_0010_1000;
// 7m 000000000010
// 7M 000000000001
const ANY_SEVENTH_MASK: u16 = 0b0000_0000_0011;

/// Options for a detection run
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DetectOptions {
    /// Tolerate a missing fifth in seventh chords: a rotation with no
    /// altered fifth is also matched as if it contained a perfect fifth.
    pub assume_perfect_fifth: bool,
}

/// A scored candidate produced during one detection run.
struct FoundChord {
    weight: f32,
    name: String,
}

/// Builder for `ChordDetector` to customize the dictionary and options
pub struct ChordDetectorBuilder<'a> {
    dictionary: &'a ChordDictionary,
    assume_perfect_fifth: bool,
}

impl ChordDetectorBuilder<'static> {
    /// Create a new builder targeting the standard dictionary.
    pub fn new() -> Self {
        ChordDetectorBuilder {
            dictionary: standard_dictionary(),
            assume_perfect_fifth: false,
        }
    }
}

impl<'a> ChordDetectorBuilder<'a> {
    /// Match against a caller-owned dictionary instead of the standard one.
    pub fn dictionary<'b>(self, dictionary: &'b ChordDictionary) -> ChordDetectorBuilder<'b> {
        ChordDetectorBuilder {
            dictionary,
            assume_perfect_fifth: self.assume_perfect_fifth,
        }
    }

    /// Set the fifth-relaxation heuristic (default false).
    pub fn assume_perfect_fifth(mut self, value: bool) -> Self {
        self.assume_perfect_fifth = value;
        self
    }

    /// Build the `ChordDetector`.
    pub fn build(self) -> ChordDetector<'a> {
        ChordDetector {
            dictionary: self.dictionary,
            cache: PcsetCache::new(),
            assume_perfect_fifth: self.assume_perfect_fifth,
        }
    }
}

impl Default for ChordDetectorBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

/// Main chord detector
pub struct ChordDetector<'a> {
    dictionary: &'a ChordDictionary,
    cache: PcsetCache,
    assume_perfect_fifth: bool,
}

impl ChordDetector<'static> {
    /// Create a detector with default options and the standard dictionary.
    pub fn new() -> Self {
        ChordDetectorBuilder::new().build()
    }
}

impl Default for ChordDetector<'static> {
    fn default() -> Self {
        ChordDetector::new()
    }
}

impl<'a> ChordDetector<'a> {
    /// Return a builder to customize the dictionary and options.
    pub fn builder() -> ChordDetectorBuilder<'static> {
        ChordDetectorBuilder::new()
    }

    /// Chord names implied by the notes, best match first. Empty input
    /// yields an empty list.
    pub fn detect(&mut self, notes: &[NoteName]) -> Vec<String> {
        let mut found = self.find_matches(notes, 1.0);
        found.retain(|chord| chord.weight > 0.0);
        // Stable: ties keep rotation order, then catalog order.
        found.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        found.into_iter().map(|chord| chord.name).collect()
    }

    fn find_matches(&mut self, notes: &[NoteName], weight: f32) -> Vec<FoundChord> {
        let Some(&tonic) = notes.first() else {
            return Vec::new();
        };
        let tonic_chroma = tonic.pitch_class();

        // All rotations, so every pitch class gets a turn as the root.
        let modes = self.cache.modes(notes, false);

        let mut found = Vec::new();
        for (rotation, &mode) in modes.iter().enumerate() {
            let relaxed = if self.assume_perfect_fifth {
                with_perfect_fifth(mode)
            } else {
                mode
            };

            // Distinct shapes can share a chroma under different interval
            // spellings; all of them are emitted.
            for chord in self.dictionary.all() {
                let target = if self.assume_perfect_fifth && implies_seventh_chord(chord.chroma())
                {
                    relaxed
                } else {
                    mode
                };
                if chord.chroma() != target {
                    continue;
                }

                let Some(base) = NoteName::from_pitch_class(rotation as u8) else {
                    continue;
                };
                let symbol = chord.symbol();
                if base.pitch_class() == tonic_chroma {
                    found.push(FoundChord {
                        weight: 1.0 * weight,
                        name: format!("{base}{symbol}"),
                    });
                } else {
                    found.push(FoundChord {
                        weight: 0.5 * weight,
                        name: format!("{base}{symbol}/{tonic}"),
                    });
                }
            }
        }
        found
    }
}

/// Seventh chords with a clean fifth are the only shapes eligible for fifth
/// relaxation; it must not invent fifths for plain triads.
fn implies_seventh_chord(chroma: Chroma) -> bool {
    let set = chroma.set_num();
    set & ANY_THIRD_MASK != 0
        && set & PERFECT_FIFTH_MASK != 0
        && set & ANY_SEVENTH_MASK != 0
}

/// Fill in a perfect fifth unless an altered fifth is already present.
fn with_perfect_fifth(chroma: Chroma) -> Chroma {
    if chroma.set_num() & NON_PERFECT_FIFTH_MASK != 0 {
        chroma
    } else {
        Chroma::from_set_num(chroma.set_num() | PERFECT_FIFTH_MASK)
    }
}

/// Shared read-only dictionary backing the convenience entry points.
fn standard_dictionary() -> &'static ChordDictionary {
    static STANDARD: Lazy<ChordDictionary> = Lazy::new(ChordDictionary::standard);
    &STANDARD
}

/// Detect chords with default options against the standard dictionary.
///
/// ```rust
/// use chord_namer::{detect, NoteName};
///
/// let notes: Vec<NoteName> = ["D", "F#", "A", "C"]
///     .iter()
///     .map(|name| name.parse())
///     .collect::<Result<_, _>>()?;
/// assert_eq!(detect(&notes), vec!["D7".to_string()]);
/// # Ok::<(), chord_namer::ParseNoteError>(())
/// ```
pub fn detect(notes: &[NoteName]) -> Vec<String> {
    detect_with_options(notes, DetectOptions::default())
}

/// Detect chords with explicit options against the standard dictionary.
pub fn detect_with_options(notes: &[NoteName], options: DetectOptions) -> Vec<String> {
    ChordDetector::builder()
        .assume_perfect_fifth(options.assume_perfect_fifth)
        .build()
        .detect(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fifth_relaxation() {
        // 1P 3m 7m
        let bare = Chroma::from_set_num(0b1001_0000_0010);
        assert_eq!(
            with_perfect_fifth(bare).set_num(),
            0b1001_0001_0010,
            "missing fifth is filled in"
        );

        // 1P 3m 5d 7m keeps its diminished fifth.
        let diminished = Chroma::from_set_num(0b1001_0010_0010);
        assert_eq!(with_perfect_fifth(diminished), diminished);
    }

    #[test]
    fn seventh_chord_eligibility() {
        let dictionary = ChordDictionary::standard();
        let eligible = |key: &str| implies_seventh_chord(dictionary.get(key).unwrap().chroma());

        assert!(eligible("m7"));
        assert!(eligible("maj7"));
        assert!(eligible("7"));
        // Triads and altered-fifth shapes are out.
        assert!(!eligible("M"));
        assert!(!eligible("m6"));
        assert!(!eligible("m7b5"));
        assert!(!eligible("aug"));
    }
}
