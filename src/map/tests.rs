use super::*;

#[test]
fn try_new_rejects_truncated_map() {
    let err = ShuffleMap::try_new(vec![1, 0, 2], 1).unwrap_err();
    assert!(matches!(err, ShuffleError::InvalidMap(_)));
}

#[test]
fn inverse_undoes_gather() {
    let map = ShuffleMap::try_new(vec![2, 0, 3, 1], 1).unwrap();
    let src = ['a', 'b', 'c', 'd'];
    let shuffled = map.gather(&src).unwrap();
    assert_eq!(shuffled, vec!['c', 'a', 'd', 'b']);
    let restored = map.inverse().gather(&shuffled).unwrap();
    assert_eq!(restored, src.to_vec());
}

#[test]
fn swap_pairs_is_self_inverse() {
    let map = ShuffleMap::try_new(vec![1, 0, 3, 2], 1).unwrap();
    assert_eq!(map.inverse(), map);
    assert!(map.then(&map).unwrap().is_identity());
}

#[test]
fn composition_matches_sequential_gathers() {
    let a = generate_map(2, 11).unwrap();
    let b = generate_map(2, 12).unwrap();
    let src: Vec<u32> = (0..16).collect();
    let sequential = b.gather(&a.gather(&src).unwrap()).unwrap();
    let composed = a.then(&b).unwrap().gather(&src).unwrap();
    assert_eq!(sequential, composed);
}

#[test]
fn composition_requires_matching_granularity() {
    let a = ShuffleMap::identity(1).unwrap();
    let b = ShuffleMap::identity(2).unwrap();
    assert!(a.then(&b).is_err());
}

#[test]
fn grid_round_trip() {
    let rows = vec![vec![3, 1], vec![0, 2]];
    let map = ShuffleMap::from_grid(&rows, 1).unwrap();
    assert_eq!(map.as_slice(), &[3, 1, 0, 2]);
    assert_eq!(map.to_grid(), rows);
    assert!(ShuffleMap::from_grid(&[vec![0, 1, 2, 3]], 1).is_err());
}

#[test]
fn deserialize_flat_with_inferred_granularity() {
    let map: ShuffleMap = serde_json::from_str(r#"{"entries": [1, 0, 3, 2]}"#).unwrap();
    assert_eq!(map.granularity(), 1);
}

#[test]
fn deserialize_grid_form() {
    let map: ShuffleMap =
        serde_json::from_str(r#"{"granularity": 1, "entries": [[1, 0], [3, 2]]}"#).unwrap();
    assert_eq!(map.as_slice(), &[1, 0, 3, 2]);
}

#[test]
fn deserialize_rejects_malformed_maps() {
    assert!(serde_json::from_str::<ShuffleMap>(r#"{"entries": [0, 0, 1, 2]}"#).is_err());
    assert!(serde_json::from_str::<ShuffleMap>(r#"{"entries": [0, 1, 2]}"#).is_err());
    assert!(
        serde_json::from_str::<ShuffleMap>(r#"{"granularity": 2, "entries": [1, 0, 3, 2]}"#)
            .is_err()
    );
}

#[test]
fn serialize_round_trips() {
    let map = generate_map(1, 5).unwrap();
    let json = serde_json::to_string(&map).unwrap();
    let back: ShuffleMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}

#[test]
fn gather_checks_length() {
    let map = ShuffleMap::identity(1).unwrap();
    assert!(map.gather(&[1u8, 2, 3]).is_err());
}
