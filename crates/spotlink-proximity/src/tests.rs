use crate::{
    measure_spots, nearest_distance, spot_number, BinaryMask, MaskIndex, MaskSequence,
    ProximityError, SpotRoi,
};
use rand::Rng;

/// All-pairs reference for the k-d tree search.
fn brute_force_nearest(roi: &[(f64, f64)], mask: &BinaryMask) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (mx, my) in mask.foreground() {
        for &(rx, ry) in roi {
            let d2 = (rx - mx).powi(2) + (ry - my).powi(2);
            if best.map_or(true, |b| d2 < b) {
                best = Some(d2);
            }
        }
    }
    best.map(f64::sqrt)
}

fn mask_with(points: &[(usize, usize)]) -> BinaryMask {
    let mut mask = BinaryMask::empty(16, 16);
    for &(x, y) in points {
        mask.set(x, y, 255);
    }
    mask
}

#[test]
fn mask_size_is_checked() {
    let err = BinaryMask::new(4, 4, vec![0; 15]).unwrap_err();
    assert_eq!(
        err,
        ProximityError::MaskSize {
            width: 4,
            height: 4,
            expected: 16,
            actual: 15
        }
    );
}

#[test]
fn foreground_yields_xy_coordinates() {
    let mask = BinaryMask::new(3, 2, vec![0, 0, 1, 0, 7, 0]).unwrap();
    let fg: Vec<_> = mask.foreground().collect();
    assert_eq!(fg, vec![(2.0, 0.0), (1.0, 1.0)]);
}

#[test]
fn nearest_distance_picks_closest_pair() {
    let mask = mask_with(&[(10, 10), (3, 4)]);
    let roi = [(0.0, 0.0), (6.0, 8.0)];
    let d = nearest_distance(&roi, &mask).unwrap();
    // (6, 8) to (3, 4)
    assert!((d - 5.0).abs() < 1e-12);
}

#[test]
fn nearest_distance_matches_brute_force_reference() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let points: Vec<(usize, usize)> = (0..5)
            .map(|_| (rng.gen_range(0..16), rng.gen_range(0..16)))
            .collect();
        let mask = mask_with(&points);
        let roi: Vec<(f64, f64)> = (0..4)
            .map(|_| (rng.gen_range(0.0..16.0), rng.gen_range(0.0..16.0)))
            .collect();

        let expected = brute_force_nearest(&roi, &mask).unwrap();
        let got = nearest_distance(&roi, &mask).unwrap();
        assert!((got - expected).abs() < 1e-9);
    }
}

#[test]
fn dense_mask_matches_brute_force_reference() {
    let mut rng = rand::thread_rng();
    let pixels: Vec<u8> = (0..64 * 64)
        .map(|_| if rng.gen_bool(0.3) { 255 } else { 0 })
        .collect();
    let mask = BinaryMask::new(64, 64, pixels).unwrap();
    let index = MaskIndex::new(&mask).unwrap();

    for _ in 0..50 {
        let roi: Vec<(f64, f64)> = (0..6)
            .map(|_| (rng.gen_range(-10.0..74.0), rng.gen_range(-10.0..74.0)))
            .collect();
        let expected = brute_force_nearest(&roi, &mask).unwrap();
        let got = index.nearest(&roi).unwrap();
        assert!((got - expected).abs() < 1e-9);
    }
}

#[test]
fn mask_index_needs_foreground() {
    assert!(MaskIndex::new(&BinaryMask::empty(8, 8)).is_none());
    let index = MaskIndex::new(&mask_with(&[(2, 2)])).unwrap();
    assert_eq!(index.nearest(&[]), None);
}

#[test]
fn deserialised_mask_is_size_checked() {
    let err = serde_json::from_str::<BinaryMask>(r#"{"width":0,"height":1,"pixels":[1]}"#);
    assert!(err.is_err());

    let err = serde_json::from_str::<BinaryMask>(r#"{"width":2,"height":2,"pixels":[]}"#);
    assert!(err.is_err());

    let mask: BinaryMask =
        serde_json::from_str(r#"{"width":2,"height":2,"pixels":[0,0,0,9]}"#).unwrap();
    assert_eq!(mask.foreground().collect::<Vec<_>>(), vec![(1.0, 1.0)]);
    let json = serde_json::to_string(&mask).unwrap();
    assert_eq!(serde_json::from_str::<BinaryMask>(&json).unwrap(), mask);
}

#[test]
fn oversized_mask_dimensions_are_rejected() {
    let err = BinaryMask::new(usize::MAX, 2, vec![]).unwrap_err();
    assert_eq!(
        err,
        ProximityError::MaskOverflow {
            width: usize::MAX,
            height: 2
        }
    );
}

#[test]
fn nearest_distance_is_none_without_input() {
    assert_eq!(nearest_distance(&[(1.0, 1.0)], &BinaryMask::empty(4, 4)), None);
    assert_eq!(nearest_distance(&[], &mask_with(&[(1, 1)])), None);
}

#[test]
fn spot_labels_reduce_to_digits() {
    assert_eq!(spot_number("ID1234"), Some(1234));
    assert_eq!(spot_number("spot_0_7"), Some(7));
    assert_eq!(spot_number("none"), None);
}

#[test]
fn resolve_falls_back_to_newest_earlier_foreground() {
    let mut masks = MaskSequence::new();
    masks.insert(0, mask_with(&[(0, 0)]));
    masks.insert(1, mask_with(&[(5, 5)]));
    masks.insert(2, BinaryMask::empty(16, 16));
    masks.insert(3, BinaryMask::empty(16, 16));

    let (frame, mask) = masks.resolve(3).unwrap();
    assert_eq!(frame, 1);
    assert_eq!(mask.foreground().next(), Some((5.0, 5.0)));
    assert_eq!(masks.resolve(1).unwrap().0, 1);
}

#[test]
fn resolve_errors_when_walk_runs_out() {
    let mut masks = MaskSequence::new();
    masks.insert(0, BinaryMask::empty(4, 4));
    masks.insert(1, BinaryMask::empty(4, 4));
    assert_eq!(masks.resolve(1).unwrap_err(), ProximityError::NoMaskAvailable(1));

    let mut gappy = MaskSequence::new();
    gappy.insert(5, BinaryMask::empty(4, 4));
    assert_eq!(gappy.resolve(5).unwrap_err(), ProximityError::MissingFrame(4));
}

#[test]
fn measure_spots_skips_untracked_and_uses_fallback() {
    let mut masks = MaskSequence::new();
    masks.insert(0, mask_with(&[(0, 0)]));
    masks.insert(1, BinaryMask::empty(16, 16));

    let rois = vec![
        SpotRoi {
            label: "ID7".into(),
            frame: 1,
            track_id: Some(0),
            pixels: vec![(3.0, 4.0)],
        },
        SpotRoi {
            label: "ID8".into(),
            frame: 0,
            track_id: None,
            pixels: vec![(1.0, 1.0)],
        },
    ];

    let out = measure_spots(&rois, &masks).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].spot_id, 7);
    assert_eq!(out[0].mask_frame, 0);
    assert!((out[0].distance - 5.0).abs() < 1e-12);
}

#[test]
fn measure_spots_rejects_empty_roi() {
    let mut masks = MaskSequence::new();
    masks.insert(0, mask_with(&[(0, 0)]));
    let rois = vec![SpotRoi {
        label: "ID3".into(),
        frame: 0,
        track_id: Some(1),
        pixels: vec![],
    }];
    assert_eq!(
        measure_spots(&rois, &masks).unwrap_err(),
        ProximityError::EmptyRoi("ID3".into())
    );
}
