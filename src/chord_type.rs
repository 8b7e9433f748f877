//! Chord Dictionary
//!
//! A catalog of known chord shapes, each an interval list reduced to a
//! pitch-class set, indexed for lookup by full name, alias, chroma string or
//! set number. The standard catalog is built from the static table in
//! [`crate::data`]; dictionaries are plain values, so callers needing
//! concurrent mutation add their own synchronization.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use crate::data::CHORD_TABLE;
use crate::pcset::{Chroma, Pcset, PcsetCache};

/// Broad chord quality derived from the characteristic intervals
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChordQuality {
    /// Contains a major third (or an augmented fifth seen first).
    Major,
    /// Contains a minor third.
    Minor,
    /// Contains an augmented fifth.
    Augmented,
    /// Contains a diminished fifth.
    Diminished,
    /// None of the characteristic intervals are present.
    Unknown,
}

impl Display for ChordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A chord shape: a named, aliased interval list reduced to a chroma.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordType {
    /// The shape's pitch-class set.
    pub pcset: Pcset,
    /// Full descriptive name ("dominant seventh"); empty for legacy shapes.
    pub name: String,
    /// Broad quality.
    pub quality: ChordQuality,
    /// Defining interval list, ascending from "1P".
    pub intervals: Vec<String>,
    /// Symbols; the first is the canonical one.
    pub aliases: Vec<String>,
}

impl ChordType {
    /// Canonical symbol, or "" for a shape without aliases.
    pub fn symbol(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }

    /// The shape's chroma.
    pub fn chroma(&self) -> Chroma {
        self.pcset.chroma()
    }

    /// The shape's set number.
    pub fn set_num(&self) -> u16 {
        self.pcset.set_num()
    }
}

/// First characteristic interval wins, in interval-list order.
fn derive_quality(intervals: &[String]) -> ChordQuality {
    for interval in intervals {
        match interval.as_str() {
            "5A" => return ChordQuality::Augmented,
            "3M" => return ChordQuality::Major,
            "5d" => return ChordQuality::Diminished,
            "3m" => return ChordQuality::Minor,
            _ => {}
        }
    }
    ChordQuality::Unknown
}

/// Catalog of chord shapes with a combined lookup index.
///
/// The index spans four key spaces — full names, aliases, chroma strings and
/// set-number strings — in one map; on a key collision the last shape added
/// wins, as in the reference catalog.
#[derive(Debug, Clone, Default)]
pub struct ChordDictionary {
    cache: PcsetCache,
    catalog: Vec<Arc<ChordType>>,
    index: HashMap<String, Arc<ChordType>>,
}

impl ChordDictionary {
    /// An empty dictionary.
    pub fn new() -> ChordDictionary {
        ChordDictionary::default()
    }

    /// A dictionary preloaded with the standard chord shape table, ordered
    /// ascending by set number.
    pub fn standard() -> ChordDictionary {
        let mut dictionary = ChordDictionary::new();
        for (interval_text, full_name, alias_text) in CHORD_TABLE {
            let intervals: Vec<&str> = interval_text.split_whitespace().collect();
            let aliases: Vec<&str> = alias_text.split_whitespace().collect();
            dictionary.add(&intervals, &aliases, full_name);
        }
        dictionary.catalog.sort_by_key(|chord| chord.set_num());
        dictionary
    }

    /// Look up a shape by full name, alias, chroma string or set-number
    /// string.
    pub fn get(&self, key: &str) -> Option<&ChordType> {
        self.index.get(key).map(Arc::as_ref)
    }

    /// Full names of all shapes that have one, in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.catalog
            .iter()
            .filter(|chord| !chord.name.is_empty())
            .map(|chord| chord.name.as_str())
            .collect()
    }

    /// Canonical symbols of all shapes, in catalog order.
    pub fn symbols(&self) -> Vec<&str> {
        self.catalog
            .iter()
            .filter(|chord| !chord.aliases.is_empty())
            .map(|chord| chord.symbol())
            .collect()
    }

    /// All shapes in catalog order.
    pub fn all(&self) -> impl Iterator<Item = &ChordType> {
        self.catalog.iter().map(Arc::as_ref)
    }

    /// Number of shapes in the catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Register a chord shape and index it under every key.
    pub fn add(&mut self, intervals: &[&str], aliases: &[&str], full_name: &str) {
        let intervals: Vec<String> = intervals.iter().map(|i| i.to_string()).collect();
        let pcset = self.cache.from_intervals(&intervals).clone();
        let chord = Arc::new(ChordType {
            quality: derive_quality(&intervals),
            name: full_name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            intervals,
            pcset,
        });

        self.catalog.push(Arc::clone(&chord));
        if !chord.name.is_empty() {
            self.index.insert(chord.name.clone(), Arc::clone(&chord));
        }
        self.index
            .insert(chord.set_num().to_string(), Arc::clone(&chord));
        self.index
            .insert(chord.chroma().to_string(), Arc::clone(&chord));
        for alias in &chord.aliases {
            self.index.insert(alias.clone(), Arc::clone(&chord));
        }
    }

    /// Clear the catalog and the index.
    pub fn remove_all(&mut self) {
        self.catalog.clear();
        self.index.clear();
    }
}
