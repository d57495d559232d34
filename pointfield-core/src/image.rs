/// Bitmap-derived intensity fields used as point-cloud sources
use std::path::Path;

use crate::error::ImageError;

/// Bytes per pixel in the raw bitmap payload
const BYTES_PER_PIXEL: u64 = 3;

/// Map an 8-bit sample to fully off or fully on
#[inline]
pub fn quantize(sample: u8) -> u8 {
    sample / 128 * 255
}

/// Fixed-size grid of 0/255 intensities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageField {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ImageField {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Build a field from row-major samples. Samples are quantized; missing
    /// samples stay blank and extra samples are ignored.
    pub fn from_intensities(width: usize, height: usize, samples: &[u8]) -> Self {
        let mut field = Self::blank(width, height);
        for (cell, &sample) in field.data.iter_mut().zip(samples) {
            *cell = quantize(sample);
        }
        field
    }

    /// Load a raw 24-bit bitmap into a field of the given size.
    ///
    /// The square side is the largest power of two whose square fits in the
    /// file as 3-byte pixels; everything before that payload is treated as a
    /// header. One byte per pixel is sampled (the byte after the header plus
    /// one, then every third byte) and the image is centred in the field.
    /// Pixels outside the field are cropped.
    pub fn from_file(
        path: impl AsRef<Path>,
        width: usize,
        height: usize,
    ) -> Result<Self, ImageError> {
        let data = std::fs::read(path)?;
        let mut field = Self::blank(width, height);
        field.fill_from_bitmap(&data)?;
        Ok(field)
    }

    /// Overlay a raw bitmap payload onto this field
    pub fn fill_from_bitmap(&mut self, data: &[u8]) -> Result<(), ImageError> {
        let len = data.len() as u64;
        let side = bitmap_side(len).ok_or(ImageError::Empty(len))?;
        let header = (len - (side * side) as u64 * BYTES_PER_PIXEL) as usize;

        let x0 = (self.width / 2) as isize - (side / 2) as isize;
        let y0 = (self.height / 2) as isize - (side / 2) as isize;

        for row in 0..side {
            let fy = y0 + row as isize;
            if fy < 0 || fy >= self.height as isize {
                continue;
            }
            for col in 0..side {
                let fx = x0 + col as isize;
                if fx < 0 || fx >= self.width as isize {
                    continue;
                }
                let offset = header + 1 + (row * side + col) * BYTES_PER_PIXEL as usize;
                self.data[fy as usize * self.width + fx as usize] = quantize(data[offset]);
            }
        }

        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Intensity at (x, y), or 0 outside the field
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Coordinates and intensity of every nonzero cell, row by row
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }
}

/// Side length of the square image a payload of `len` bytes can hold
fn bitmap_side(len: u64) -> Option<usize> {
    let pixels = len / BYTES_PER_PIXEL;
    if pixels == 0 {
        return None;
    }
    let mut side: u64 = 1;
    while (side * 2) * (side * 2) <= pixels {
        side *= 2;
    }
    Some(side as usize)
}
