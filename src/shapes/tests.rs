use super::*;
use crate::pitch::PitchClass;
use crate::tuning::{FretPosition, Tuning, MAX_FRETS};

fn positions(shape: &Shape) -> Vec<FretPosition> {
    shape.positions().collect()
}

fn pos(string: usize, fret: usize) -> FretPosition {
    FretPosition::new(string, fret)
}

#[test]
fn test_a_major_top_strings_root_position() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, MAX_FRETS);
    let chord = ChordSpec::new(PitchClass::A, ChordQuality::Major, [3, 4, 5]);
    let expected = vec![pos(3, 14), pos(4, 14), pos(5, 12)];

    let cells = [(pos(3, 14), "1"), (pos(4, 14), "3"), (pos(5, 12), "5")];
    for (cell, label) in cells {
        let hl = resolver
            .resolve(&chord, cell)
            .unwrap_or_else(|| panic!("{} should be highlighted", cell));
        assert_eq!(positions(&hl.shape), expected, "cell {}", cell);
        assert_eq!(hl.label, label);
        assert_eq!(hl.inversion, Inversion::RootPosition);
        assert_eq!(hl.fingerprint.as_str(), "220");
        assert_eq!(hl.color, Fingerprint::of(expected.iter().copied()).color());
    }

    let catalog = triad_shape(TriadKey::AMajor, StringGroup::Top, 2).unwrap();
    assert_eq!(catalog.positions().to_vec(), expected);
}

#[test]
fn test_neighbouring_shapes_resolve_independently() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::A, ChordQuality::Major, [3, 4, 5]);

    let second = resolver.resolve(&chord, pos(3, 9)).unwrap();
    assert_eq!(positions(&second.shape), vec![pos(3, 9), pos(4, 10), pos(5, 9)]);
    assert_eq!(second.inversion, Inversion::Second);
    assert_eq!(second.fingerprint.as_str(), "010");

    let first = resolver.resolve(&chord, pos(3, 6)).unwrap();
    assert_eq!(positions(&first.shape), vec![pos(3, 6), pos(4, 5), pos(5, 5)]);
    assert_eq!(first.inversion, Inversion::First);
    assert_eq!(first.fingerprint.as_str(), "100");
}

#[test]
fn test_minor_labels_use_flat_three() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::E, ChordQuality::Minor, [3, 4, 5]);

    // G string fret 12 is G, the minor third of E.
    let hl = resolver.resolve(&chord, pos(3, 12)).unwrap();
    assert_eq!(hl.label, "b3");
    assert_eq!(hl.tone, ChordTone::Third);
    assert_eq!(positions(&hl.shape), vec![pos(3, 12), pos(4, 12), pos(5, 12)]);
    assert_eq!(hl.inversion, Inversion::First);
}

#[test]
fn test_non_chord_tones_and_inactive_strings_are_not_highlighted() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::A, ChordQuality::Major, [3, 4, 5]);

    // G string fret 0 is G, not in A major.
    assert!(resolver.resolve(&chord, pos(3, 0)).is_none());
    // Low E string is not active.
    assert!(resolver.resolve(&chord, pos(0, 5)).is_none());
    // Past the end of the board.
    assert!(resolver.resolve(&chord, pos(3, 21)).is_none());
}

#[test]
fn test_two_strings_can_never_form_a_triad() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::A, ChordQuality::Major, [4, 5]);
    for fret in 0..=15 {
        assert!(resolver.resolve(&chord, pos(4, fret)).is_none());
        assert!(resolver.resolve(&chord, pos(5, fret)).is_none());
    }
}

#[test]
fn test_more_notes_win_on_all_strings() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::A, ChordQuality::Major, 0..6);

    let open = resolver.resolve(&chord, pos(0, 0)).unwrap();
    assert_eq!(
        positions(&open.shape),
        vec![pos(0, 0), pos(1, 0), pos(2, 2), pos(3, 2), pos(4, 2), pos(5, 0)]
    );
    // Six-note shapes are not in the color table.
    assert_eq!(open.color, NEUTRAL_COLOR);

    let barre = resolver.resolve(&chord, pos(0, 5)).unwrap();
    assert_eq!(
        positions(&barre.shape),
        vec![pos(0, 5), pos(1, 7), pos(2, 7), pos(3, 6), pos(4, 5), pos(5, 5)]
    );
}

#[test]
fn test_dominant_overlapping_shape_suppresses_cell() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::A, ChordQuality::Major, 0..6);

    // Low E fret 9 (C#) only fits a span-3 six-note shape that shares the
    // fret-7 notes with the tighter barre at fret 5.
    let cell = pos(0, 9);
    let mine = resolver.best_shape(&chord, 9, Some(cell)).unwrap();
    let global = resolver.best_shape(&chord, 9, None).unwrap();
    assert_eq!(mine.fret_span(), 3);
    assert_eq!(global.fret_span(), 2);
    assert!(global.dominates(&mine));
    assert!(global.shares_position(&mine));
    assert!(resolver.resolve(&chord, cell).is_none());
}

#[test]
fn test_constrained_search_always_contains_required_cell() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::C, ChordQuality::Major, [1, 2, 3, 4]);
    for string in 1..=4 {
        for fret in 0..=15 {
            let cell = pos(string, fret);
            if let Some(shape) = resolver.best_shape(&chord, fret, Some(cell)) {
                assert!(shape.contains(cell));
                assert!(shape.fret_span() <= MAX_SPAN);
                let tones: Vec<ChordTone> = shape.notes().iter().map(|n| n.tone).collect();
                assert!(tones.contains(&ChordTone::Root));
                assert!(tones.contains(&ChordTone::Third));
                assert!(tones.contains(&ChordTone::Fifth));
            }
        }
    }
}

#[test]
fn test_search_is_deterministic() {
    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, 15);
    let chord = ChordSpec::new(PitchClass::G, ChordQuality::Minor, 0..6);
    for fret in 0..=15 {
        let a = resolver.resolve(&chord, pos(2, fret));
        let b = resolver.resolve(&chord, pos(2, fret));
        assert_eq!(a, b);
    }
}

#[test]
fn test_catalog_entries_are_closed_triads() {
    let tuning = Tuning::standard();
    assert_eq!(TRIAD_SHAPES.len(), 24);

    for entry in TRIAD_SHAPES.iter() {
        let chord = entry.key.chord(entry.group);
        let notes: Vec<PitchClass> = entry.positions().iter().map(|&p| tuning.note_at(p)).collect();
        let mut sorted_notes = notes.clone();
        sorted_notes.sort();
        let mut tones = chord.tones().to_vec();
        tones.sort();
        assert_eq!(sorted_notes, tones, "{}", entry.title());

        let bass = chord.tone_of(notes[0]).unwrap();
        assert_eq!(Inversion::from_bass(bass), entry.inversion, "{}", entry.title());

        let fp = Fingerprint::of(entry.positions());
        assert!(fp.is_known(), "{} has unknown fingerprint {}", entry.title(), fp);

        let frets = entry.frets;
        let span = frets.iter().max().unwrap() - frets.iter().min().unwrap();
        assert!(span <= MAX_SPAN);
        assert!(*frets.iter().min().unwrap() >= 1);
    }
}

#[test]
fn test_catalog_has_three_inversions_per_group_ordered_up_the_neck() {
    for key in TriadKey::ALL {
        for group in StringGroup::ALL {
            let shapes: Vec<&TriadShape> = shapes_for(key, group).collect();
            assert_eq!(shapes.len(), 3);
            let indices: Vec<usize> = shapes.iter().map(|s| s.index).collect();
            assert_eq!(indices, vec![0, 1, 2]);

            let inversions: Vec<Inversion> = shapes.iter().map(|s| s.inversion).collect();
            assert!(inversions.contains(&Inversion::RootPosition));
            assert!(inversions.contains(&Inversion::First));
            assert!(inversions.contains(&Inversion::Second));

            let lowest: Vec<usize> = shapes.iter().map(|s| *s.frets.iter().min().unwrap()).collect();
            assert!(lowest.windows(2).all(|w| w[0] < w[1]), "{:?} {:?}", key, group);
        }
    }
}

#[test]
fn test_catalog_title() {
    let shape = triad_shape(TriadKey::AMajor, StringGroup::Top, 2).unwrap();
    assert_eq!(shape.title(), "A Major / top / Pos-3 (Root Pos)");
    assert!(triad_shape(TriadKey::AMajor, StringGroup::Top, 3).is_none());
}

#[test]
fn test_string_group_parsing() {
    assert_eq!("top".parse(), Ok(StringGroup::Top));
    assert_eq!(" Bottom ".parse(), Ok(StringGroup::Bottom));
    for group in [StringGroup::Bottom, StringGroup::Lower, StringGroup::Upper, StringGroup::Top] {
        assert_eq!(group.name().parse(), Ok(group));
    }
    assert_eq!(
        "middle".parse::<StringGroup>(),
        Err(crate::FretError::InvalidStringGroup("middle".to_string()))
    );
}
