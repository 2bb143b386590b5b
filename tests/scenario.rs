mod common;

use common::synthetic_image::{checkerboard_u8, index_image};
use pane_shuffle::geometry::Geometry;
use pane_shuffle::shuffle::extract_pane;
use pane_shuffle::{pow2_dimensions, shuffle, unshuffle, PadMode, ShuffleMap, ShufflePlan};

#[test]
fn four_by_four_pair_swap() {
    let _ = env_logger::builder().is_test(true).try_init();
    let img = index_image(4, 1);
    let g = Geometry::new(2, 1).unwrap();
    let out_map = [1usize, 0, 3, 2];

    let out = shuffle(&img, 2, 1, None, Some(&out_map[..])).unwrap();
    for (dst, &src) in out_map.iter().enumerate() {
        assert_eq!(
            extract_pane(&out, &g, dst).unwrap(),
            extract_pane(&img, &g, src).unwrap(),
            "output pane {dst} should hold source pane {src}"
        );
    }

    // The map is its own inverse.
    let again = shuffle(&out, 2, 1, None, Some(&out_map[..])).unwrap();
    assert_eq!(again, img);
}

#[test]
fn single_pane_shuffle_is_noop() {
    let img = checkerboard_u8(16, 4);
    let out = shuffle(&img, 4, 0, None, Some(&[0usize][..])).unwrap();
    assert_eq!(out, img);
}

#[test]
fn padded_mnist_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let digit = checkerboard_u8(32, 3).crop(28, 28).unwrap();
    let normalized = pow2_dimensions(&digit, PadMode::Edge).unwrap();
    assert_eq!(normalized.log_dim, 5);

    let plan = ShufflePlan::random(Geometry::new(5, 2).unwrap(), Some(11), Some(12)).unwrap();
    let shuffled = plan.apply(&normalized.image).unwrap();
    assert_ne!(shuffled, normalized.image);

    let restored = plan.undo(&shuffled).unwrap();
    assert_eq!(restored.crop(28, 28).unwrap(), digit);
}

#[test]
fn plan_and_free_functions_agree() {
    let img = index_image(16, 3);
    let g = Geometry::new(4, 1).unwrap();
    let plan = ShufflePlan::random(g, Some(5), Some(6)).unwrap();
    let outer = plan.outer().map(ShuffleMap::as_slice);
    let inner = plan.inner().map(ShuffleMap::as_slice);

    let via_plan = plan.apply(&img).unwrap();
    let via_fn = shuffle(&img, 4, 1, inner, outer).unwrap();
    assert_eq!(via_plan, via_fn);
    assert_eq!(unshuffle(&via_fn, 4, 1, inner, outer).unwrap(), img);
}

#[test]
fn manual_inverse_phases_restore_image() {
    let img = index_image(4, 1);
    let out_map = ShuffleMap::try_new(vec![1, 2, 3, 0], 1).unwrap();
    let in_map = ShuffleMap::try_new(vec![3, 2, 1, 0], 1).unwrap();
    let g = Geometry::new(2, 1).unwrap();
    let fwd = shuffle(&img, 2, 1, Some(in_map.as_slice()), Some(out_map.as_slice())).unwrap();

    let restored = pane_shuffle::shuffle_panes(
        &pane_shuffle::shuffle_pixels(&fwd, &g, in_map.inverse().as_slice()).unwrap(),
        &g,
        out_map.inverse().as_slice(),
    )
    .unwrap();
    assert_eq!(restored, img);
}
