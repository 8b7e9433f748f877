//! End-to-end detection scenarios against the standard chord dictionary.

use chord_namer::{
    detect, detect_with_options, ChordDetector, ChordDictionary, DetectOptions, NoteName,
};
use lazy_static::lazy_static;

lazy_static! {
    static ref DICTIONARY: ChordDictionary = ChordDictionary::standard();
}

/// Parse note names, skipping anything unrecognized.
fn notes(names: &[&str]) -> Vec<NoteName> {
    names.iter().filter_map(|name| name.parse().ok()).collect()
}

fn assert_detects(result: &[String], expected: &[&str]) {
    for chord in expected {
        assert!(
            result.iter().any(|found| found == chord),
            "expected {chord} in {result:?}"
        );
    }
}

#[test]
fn detects_root_position_seventh() {
    let result = detect(&notes(&["D", "F#", "A", "C"]));
    assert_detects(&result, &["D7"]);
    // Root position outranks everything else.
    assert_eq!(result.first().map(String::as_str), Some("D7"));
}

#[test]
fn detects_inversions_over_the_tonic() {
    assert_detects(&detect(&notes(&["F#", "A", "C", "D"])), &["D7/F#"]);
    assert_detects(&detect(&notes(&["A", "C", "D", "F#"])), &["D7/A"]);
}

#[test]
fn detects_shapes_sharing_a_chroma() {
    let result = detect(&notes(&["E", "G#", "B", "C#"]));
    assert_detects(&result, &["E6", "C#m7/E"]);
}

#[test]
fn assume_perfect_fifth_fills_shell_voicings() {
    let shell = notes(&["D", "F", "C"]);

    let relaxed = detect_with_options(&shell, DetectOptions { assume_perfect_fifth: true });
    assert_detects(&relaxed, &["Dm7"]);

    let strict = detect_with_options(&shell, DetectOptions { assume_perfect_fifth: false });
    assert!(strict.is_empty(), "no match without the fifth: {strict:?}");
}

#[test]
fn assume_perfect_fifth_keeps_complete_chords() {
    let complete = notes(&["D", "F", "A", "C"]);
    for assume_perfect_fifth in [true, false] {
        let result = detect_with_options(&complete, DetectOptions { assume_perfect_fifth });
        assert_detects(&result, &["Dm7"]);
    }
}

#[test]
fn assume_perfect_fifth_respects_altered_fifths() {
    // The diminished fifth blocks the relaxation; the half-diminished shape
    // must match as spelled, not as a fabricated Dm7.
    let result = detect_with_options(
        &notes(&["D", "F", "Ab", "C"]),
        DetectOptions { assume_perfect_fifth: true },
    );
    assert_detects(&result, &["Dm7b5", "Fm6/D"]);
    assert!(
        !result.iter().any(|chord| chord == "Dm7"),
        "invented a perfect fifth: {result:?}"
    );
}

#[test]
fn detects_augmented_rotations() {
    // Regression: every rotation of the symmetric augmented triad matches.
    let result = detect(&notes(&["C", "E", "G#"]));
    assert_detects(&result, &["Caug", "Eaug/C", "G#aug/C"]);
    assert_eq!(result.first().map(String::as_str), Some("Caug"));
}

#[test]
fn tonic_is_spelled_sharp() {
    let result = detect(&notes(&["Ab", "C", "Eb"]));
    assert_detects(&result, &["G#M"]);
}

#[test]
fn empty_input_detects_nothing() {
    assert!(detect(&[]).is_empty());
}

#[test]
fn detection_is_idempotent() {
    let input = notes(&["E", "G#", "B", "C#"]);
    assert_eq!(detect(&input), detect(&input));

    let mut detector = ChordDetector::new();
    assert_eq!(detector.detect(&input), detector.detect(&input));
}

#[test]
fn detector_builder_with_custom_dictionary() {
    let mut detector = ChordDetector::builder().dictionary(&DICTIONARY).build();
    assert_detects(&detector.detect(&notes(&["D", "F#", "A", "C"])), &["D7"]);

    let mut empty = ChordDictionary::new();
    empty.add(&["1P", "5P"], &["pow"], "power chord");
    let mut detector = ChordDetector::builder().dictionary(&empty).build();
    let result = detector.detect(&notes(&["C", "G"]));
    assert_detects(&result, &["Cpow"]);
}

#[test]
fn dictionary_introspection() {
    assert_eq!(DICTIONARY.len(), 106);
    assert!(DICTIONARY.names().contains(&"dominant seventh"));
    assert!(DICTIONARY.symbols().contains(&"m7"));
    assert_eq!(DICTIONARY.get("7").map(|c| c.name.as_str()), Some("dominant seventh"));
    assert!(DICTIONARY.get("definitely not a chord").is_none());

    let ordered: Vec<u16> = DICTIONARY.all().map(|c| c.set_num()).collect();
    assert!(ordered.windows(2).all(|pair| pair[0] <= pair[1]));
}
