//! Static chord shape table.
//!
//! Each row is (interval list, full name, alias list); lists are space
//! separated, the first alias is the canonical symbol and legacy shapes have
//! an empty full name. Rows are pure data: no two rows share a pitch-class
//! set, every row has at least one alias and intervals ascend in semitones.
//!
//! Source: https://en.wikibooks.org/wiki/Music_Theory/Complete_List_of_Chord_Patterns

pub(crate) const CHORD_TABLE: [(&str, &str, &str); 106] = [
    // ==Major==
    ("1P 3M 5P", "major", "M ^ maj"),
    ("1P 3M 5P 7M", "major seventh", "maj7 ma7 M7 Maj7 ^7"),
    ("1P 3M 5P 7M 9M", "major ninth", "maj9 ^9"),
    ("1P 3M 5P 7M 9M 13M", "major thirteenth", "maj13 Maj13 ^13"),
    ("1P 3M 5P 6M", "sixth", "6 add6 add13 M6"),
    ("1P 3M 5P 6M 9M", "sixth added ninth", "6add9 6/9 69 M69"),
    ("1P 3M 6m 7M", "major seventh flat sixth", "M7b6 ^7b6"),
    ("1P 3M 5P 7M 11A", "major seventh sharp eleventh", "maj#4 maj7#11 M7#11 ^7#11"),
    // ==Minor==
    ("1P 3m 5P", "minor", "m min -"),
    ("1P 3m 5P 7m", "minor seventh", "m7 min7 mi7 -7"),
    ("1P 3m 5P 7M", "minor/major seventh", "m/ma7 m/maj7 mM7 mMaj7 m/M7 -^7 minmaj7"),
    ("1P 3m 5P 6M", "minor sixth", "m6 -6"),
    ("1P 3m 5P 7m 9M", "minor ninth", "m9 -9"),
    ("1P 3m 5P 7M 9M", "minor/major ninth", "mM9 mMaj9 -^9"),
    ("1P 3m 5P 7m 9M 11P", "minor eleventh", "m11 -11"),
    ("1P 3m 5P 7m 9M 13M", "minor thirteenth", "m13 -13"),
    ("1P 3m 5d", "diminished", "dim o"),
    ("1P 3m 5d 7d", "diminished seventh", "dim7 o7"),
    ("1P 3m 5d 7m", "half-diminished", "m7b5 -7b5 h7 h"),
    // ==Dominant/Seventh==
    ("1P 3M 5P 7m", "dominant seventh", "7 dom"),
    ("1P 3M 5P 7m 9M", "dominant ninth", "9"),
    ("1P 3M 5P 7m 9M 13M", "dominant thirteenth", "13"),
    ("1P 3M 5P 7m 11A", "lydian dominant seventh", "7#11 7#4"),
    ("1P 3M 5P 7m 9m", "dominant flat ninth", "7b9"),
    ("1P 3M 5P 7m 9A", "dominant sharp ninth", "7#9"),
    ("1P 3M 7m 9m", "altered", "alt7"),
    ("1P 4P 5P", "suspended fourth", "sus4 sus"),
    ("1P 2M 5P", "suspended second", "sus2"),
    ("1P 4P 5P 7m", "suspended fourth seventh", "7sus4 7sus"),
    ("1P 5P 7m 9M 11P", "eleventh", "11"),
    ("1P 4P 5P 7m 9m", "suspended fourth flat ninth", "b9sus phryg 7b9sus 7b9sus4"),
    // ==Other==
    ("1P 5P", "fifth", "5"),
    ("1P 3M 5A", "augmented", "aug + +5 ^#5"),
    ("1P 3m 5A", "minor augmented", "m#5 -#5 m+"),
    ("1P 3M 5P 7M 9M 11A", "major sharp eleventh (lydian)", "maj9#11 ^9#11"),
    // ==Legacy==
    ("1P 2M 4P 5P", "", "sus24 sus4add9"),
    ("1P 3M 4P 5P", "", "add4 Madd4"),
    ("1P 3M 5A 7M 9M", "", "maj9#5 Maj9#5"),
    ("1P 3M 5A 7m", "", "7#5 +7 7+ 7aug aug7"),
    ("1P 3M 5A 7m 9A", "", "7#5#9 7#9#5 7alt"),
    ("1P 3M 5A 7m 9M", "", "9#5 9+"),
    ("1P 3M 5A 7m 9M 11A", "", "9#5#11"),
    ("1P 3M 5A 7m 9m", "", "7#5b9 7b9#5"),
    ("1P 3M 5A 7m 9m 11A", "", "7#5b9#11"),
    ("1P 3M 5A 9A", "", "+add#9"),
    ("1P 3M 5A 9M", "", "M#5add9 +add9"),
    ("1P 3M 5P 6M 11A", "", "M6#11 M6b5 6#11 6b5"),
    ("1P 3M 5P 6M 9M 11A", "", "69#11"),
    ("1P 3m 5P 6M 9M", "", "m69 -69"),
    ("1P 3M 5P 6m 7m", "", "7b6"),
    ("1P 3M 5P 7M 9M 11A 13M", "", "maj13#11 M13#11 M13+4 M13#4"),
    ("1P 3M 5P 7M 9M 11P", "", "maj11 M11 ^11"),
    ("1P 3M 5P 7M 9m", "", "M7b9"),
    ("1P 3M 5P 7m 11A 13m", "", "7#11b13 7b5b13"),
    ("1P 3M 5P 7m 13M", "", "7add6 67 7add13"),
    ("1P 3M 5P 7m 9A 11A", "", "7#9#11 7b5#9 7#9b5"),
    ("1P 3M 5P 7m 9A 11A 13M", "", "13#9#11"),
    ("1P 3M 5P 7m 9A 11A 13m", "", "7#9#11b13"),
    ("1P 3M 5P 7m 9A 13M", "", "13#9"),
    ("1P 3M 5P 7m 9A 13m", "", "7#9b13"),
    ("1P 3M 5P 7m 9M 11A", "", "9#11 9+4 9#4"),
    ("1P 3M 5P 7m 9M 11A 13M", "", "13#11 13+4 13#4"),
    ("1P 3M 5P 7m 9M 11A 13m", "", "9#11b13 9b5b13"),
    ("1P 3M 5P 7m 9m 11A", "", "7b9#11 7b5b9 7b9b5"),
    ("1P 3M 5P 7m 9m 11A 13M", "", "13b9#11"),
    ("1P 3M 5P 7m 9m 11A 13m", "", "7b9b13#11 7b9#11b13 7b5b9b13"),
    ("1P 3M 5P 7m 9m 13M", "", "13b9"),
    ("1P 3M 5P 7m 9m 13m", "", "7b9b13"),
    ("1P 3M 5P 7m 9m 9A", "", "7b9#9"),
    ("1P 3M 5P 9M", "", "Madd9 2 add9 add2"),
    ("1P 3M 5P 9m", "", "Maddb9"),
    ("1P 3M 5d", "", "Mb5"),
    ("1P 3M 5d 6M 7m 9M", "", "13b5"),
    ("1P 3M 5d 7M", "", "M7b5"),
    ("1P 3M 5d 7M 9M", "", "M9b5"),
    ("1P 3M 5d 7m", "", "7b5"),
    ("1P 3M 5d 7m 9M", "", "9b5"),
    ("1P 3M 7m", "", "7no5"),
    ("1P 3M 7m 9M", "", "9no5"),
    ("1P 3M 7m 9M 13M", "", "13no5"),
    ("1P 3m 4P 5P", "", "madd4"),
    ("1P 3m 5P 6m 7M", "", "mMaj7b6"),
    ("1P 3m 5P 6m 7M 9M", "", "mMaj9b6"),
    ("1P 3m 5P 7m 11P", "", "m7add11 m7add4"),
    ("1P 3m 5P 9M", "", "madd9"),
    ("1P 3m 5d 6M 7M", "", "o7M7"),
    ("1P 3m 5d 7M", "", "oM7"),
    ("1P 3m 5d 7m 9M", "", "m9b5"),
    ("1P 3m 5d 7m 9M 11P", "", "m11b5"),
    ("1P 3m 6m 7M", "", "mb6M7"),
    ("1P 3m 6m 7m", "", "m7#5"),
    ("1P 3m 6m 7m 9M", "", "m9#5"),
    ("1P 3m 5A 7m 9M 11P", "", "m11A"),
    ("1P 3m 6m 9m", "", "mb6b9"),
    ("1P 4P 5A 7M", "", "M7#5sus4"),
    ("1P 4P 5A 7M 9M", "", "M9#5sus4"),
    ("1P 4P 5A 7m", "", "7#5sus4"),
    ("1P 4P 5A 7m 9M", "", "9#5sus4"),
    ("1P 4P 5A 7m 9M 13M", "", "13#5sus4"),
    ("1P 4P 5d 7m", "", "7b5sus4"),
    ("1P 4P 5P 6M", "", "6sus4 6sus"),
    ("1P 4P 5P 7M", "", "M7sus4"),
    ("1P 4P 5P 7M 9M", "", "M9sus4"),
    ("1P 4P 5P 7m 9M 13M", "", "13sus4 13sus"),
    ("1P 4P 5P 7m 9m 13m", "", "7sus4b9b13 7b9b13sus4"),
    ("1P 4P 7m 10m", "", "4 quartal"),
];
