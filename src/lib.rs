//! # chord_namer
//!
//! A closed-form music-theory calculator: name the chord(s) implied by an
//! unordered collection of notes, including inversions.
//!
//! ## Example
//! ```rust
//! use chord_namer::{detect, detect_with_options, DetectOptions, NoteName};
//!
//! fn run() -> Result<(), chord_namer::ParseNoteError> {
//!     let notes: Vec<NoteName> = ["E", "G#", "B", "C#"]
//!         .iter()
//!         .map(|name| name.parse())
//!         .collect::<Result<_, _>>()?;
//!
//!     // "E6" in root position, "C#m7/E" as an inversion over the tonic.
//!     let chords = detect(&notes);
//!     assert!(chords.contains(&"E6".to_string()));
//!     assert!(chords.contains(&"C#m7/E".to_string()));
//!
//!     // Shell voicings: tolerate a missing fifth in seventh chords.
//!     let shell: Vec<NoteName> = ["D", "F", "C"]
//!         .iter()
//!         .map(|name| name.parse())
//!         .collect::<Result<_, _>>()?;
//!     let options = DetectOptions { assume_perfect_fifth: true };
//!     assert!(detect_with_options(&shell, options).contains(&"Dm7".to_string()));
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! ## Pieces
//! - [`Interval`]: textual interval notation ("3M", "P5") parsed to numeric
//!   step/semitone/chroma attributes.
//! - [`Pcset`]/[`Chroma`]: any set of notes or intervals as a 12-bit
//!   pitch-class bitmask, with rotations ("modes") and a canonical form.
//! - [`ChordDictionary`]: a catalog of chord shapes indexed by name, alias,
//!   chroma and set number.
//! - [`ChordDetector`]: matches every rotation of the input set against the
//!   dictionary and ranks root-position matches above inversions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// High-level detection API.
pub use detector::{
    detect, detect_with_options, ChordDetector, ChordDetectorBuilder, DetectOptions,
};

/// Chord shape catalog.
pub use chord_type::{ChordDictionary, ChordQuality, ChordType};

/// Pitch class set engine.
pub use pcset::{Chroma, ParseChromaError, Pcset, PcsetCache};

/// Interval notation parser.
pub use interval::{Interval, IntervalType, ParseIntervalError, Quality};

/// Note names and pitch classes.
pub use note::{NoteName, ParseNoteError};

/// Chord dictionary module.
pub mod chord_type;

/// Chord detection module.
pub mod detector;

/// Interval parsing module.
pub mod interval;

/// Note naming module.
pub mod note;

/// Pitch class set module.
pub mod pcset;

mod data;
