use crate::error::{Result, ShuffleError};

/// Borrowed image view with an explicit row stride (in samples).
#[derive(Clone, Copy, Debug)]
pub struct ImageRef<'a, T> {
    pub w: usize,
    pub h: usize,
    pub channels: usize,
    pub stride: usize, // samples between rows
    pub data: &'a [T],
}

impl<'a, T: Copy> ImageRef<'a, T> {
    /// Tightly packed view over `data`.
    pub fn packed(w: usize, h: usize, channels: usize, data: &'a [T]) -> Result<Self> {
        let stride = w * channels;
        if data.len() < stride * h {
            return Err(ShuffleError::InvalidDimension(format!(
                "{} samples cannot back a {w}x{h}x{channels} view",
                data.len()
            )));
        }
        Ok(Self {
            w,
            h,
            channels,
            stride,
            data,
        })
    }
}

impl<'a, T: Copy> crate::image::traits::ImageView for ImageRef<'a, T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
}
