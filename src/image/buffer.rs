//! Owned row-major image with interleaved channels (stride == width * channels).
//!
//! Every transform in the crate takes an `ImageBuf` by reference and returns a
//! fresh buffer; inputs are never modified in place.
use super::traits::{ImageView, ImageViewMut};
use crate::error::{Result, ShuffleError};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuf<T> {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Samples per pixel (1 for grayscale, 3 for RGB)
    pub channels: usize,
    /// Backing storage in row-major order, channels interleaved
    pub data: Vec<T>,
}

pub type ImageF32 = ImageBuf<f32>;
pub type ImageU8 = ImageBuf<u8>;

impl<T: Copy + Default> ImageBuf<T> {
    /// Construct a default-initialized buffer of size `w × h × channels`.
    pub fn new(w: usize, h: usize, channels: usize) -> Self {
        Self::filled(w, h, channels, T::default())
    }
}

impl<T: Copy> ImageBuf<T> {
    pub fn filled(w: usize, h: usize, channels: usize, value: T) -> Self {
        Self {
            w,
            h,
            channels,
            data: vec![value; w * h * channels],
        }
    }

    /// Wrap raw samples, checking that the length matches the shape.
    pub fn from_raw(w: usize, h: usize, channels: usize, data: Vec<T>) -> Result<Self> {
        if w == 0 || h == 0 || channels == 0 {
            return Err(ShuffleError::InvalidDimension(format!(
                "{w}x{h}x{channels} has a zero extent"
            )));
        }
        if data.len() != w * h * channels {
            return Err(ShuffleError::InvalidDimension(format!(
                "{} samples do not fill {w}x{h}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            w,
            h,
            channels,
            data,
        })
    }

    #[inline]
    /// Linear index of the first sample of pixel (x, y).
    pub fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * self.channels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> T {
        self.data[self.idx(x, y) + c]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: usize, v: T) {
        let i = self.idx(x, y) + c;
        self.data[i] = v;
    }

    /// `Some(log2(side))` when the image is a square with power-of-two side.
    pub fn log_side(&self) -> Option<u32> {
        (self.w == self.h && self.w.is_power_of_two()).then(|| self.w.trailing_zeros())
    }

    /// Top-left `w × h` window, the inverse of top-left anchored padding.
    pub fn crop(&self, w: usize, h: usize) -> Result<Self> {
        if w == 0 || h == 0 || w > self.w || h > self.h {
            return Err(ShuffleError::InvalidDimension(format!(
                "cannot crop {}x{} to {w}x{h}",
                self.w, self.h
            )));
        }
        let row_len = w * self.channels;
        let mut data = Vec::with_capacity(row_len * h);
        for y in 0..h {
            data.extend_from_slice(&self.row(y)[..row_len]);
        }
        Ok(Self {
            w,
            h,
            channels: self.channels,
            data,
        })
    }
}

impl<T: Copy> ImageView for ImageBuf<T> {
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
        self.w * self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let len = self.w * self.channels;
        let start = y * len;
        &self.data[start..start + len]
    }
}

impl<T: Copy> ImageViewMut for ImageBuf<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let len = self.w * self.channels;
        let start = y * len;
        &mut self.data[start..start + len]
    }
}
