use pane_shuffle::image::ImageBuf;

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(side: usize, cell: usize) -> ImageBuf<u8> {
    assert!(side > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = ImageBuf::new(side, side, 1);
    for y in 0..side {
        for x in 0..side {
            let sum = x / cell + y / cell;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img.set(x, y, 0, val);
        }
    }
    img
}

/// Every pixel carries its own row-major index, so any move is visible.
pub fn index_image(side: usize, channels: usize) -> ImageBuf<u32> {
    let data = (0..(side * side * channels) as u32).collect();
    ImageBuf::from_raw(side, side, channels, data).expect("shape matches data")
}
