use pane_shuffle::image::ImageU8;
use pane_shuffle::{pow2_dimensions, Geometry, PadMode, ShufflePlan};

fn main() {
    // Demo stub: pads a synthetic 28x28 digit-sized buffer, shuffles and restores it
    let (w, h) = (28usize, 28usize);
    let data: Vec<u8> = (0..w * h).map(|i| (i % 251) as u8).collect();
    let img = match ImageU8::from_raw(w, h, 1, data) {
        Ok(img) => img,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let result = pow2_dimensions(&img, PadMode::Zero)
        .and_then(|n| {
            let plan = ShufflePlan::random(Geometry::new(n.log_dim, 2)?, Some(1), Some(2))?;
            let shuffled = plan.apply(&n.image)?;
            let restored = plan.undo(&shuffled)?;
            Ok((n.image, shuffled, restored))
        });
    match result {
        Ok((normalized, shuffled, restored)) => {
            let moved = normalized
                .data
                .iter()
                .zip(&shuffled.data)
                .filter(|(a, b)| a != b)
                .count();
            println!(
                "side={} moved_pixels={} restored={}",
                normalized.w,
                moved,
                restored == normalized
            );
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
