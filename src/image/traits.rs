/// Read access to a row-major image with interleaved channels.
///
/// A row holds `width() * channels()` samples; `stride()` counts samples
/// between the starts of consecutive rows.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Samples of the pixel at `(x, y)`, one per channel.
    fn pixel(&self, x: usize, y: usize) -> &[Self::Pixel] {
        let c = self.channels();
        &self.row(y)[x * c..(x + 1) * c]
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [Self::Pixel] {
        let c = self.channels();
        &mut self.row_mut(y)[x * c..(x + 1) * c]
    }
}
