/// Grayscale framebuffer and point compositing
use log::{debug, trace};

use crate::config::RenderConfig;
use crate::op::Marker;
use crate::projection::{Camera, ScreenSample};
use crate::scene::Scene;
use crate::transform::{RotationTable, Transformer};

/// Bytes per framebuffer pixel
const CHANNELS: usize = 3;

/// Counts for one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Source pixels pushed through the transformer
    pub samples: usize,
    /// Samples that landed on the canvas and won their pixel
    pub plotted: usize,
}

/// RGB framebuffer with rows padded to a 4-byte stride.
///
/// Row 0 is the bottom row of the image, as in a device-independent bitmap.
/// Every pixel holds one brightness value in all three channels.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    stride: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let stride = row_stride(width);
        Self {
            width,
            height,
            stride,
            pixels: vec![0; stride * height],
        }
    }

    /// Change the canvas size. Contents are cleared.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.stride = row_stride(width);
        self.pixels.clear();
        self.pixels.resize(self.stride * height, 0);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row, including padding
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw row-major framebuffer for the presentation layer
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn brightness_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.stride + x * CHANNELS])
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Composite one sample. It is written only when it falls on the canvas
    /// and is brighter than what the pixel already holds.
    pub fn plot(&mut self, sample: ScreenSample) -> bool {
        if sample.x < 0 || sample.y < 0 {
            return false;
        }
        let (x, y) = (sample.x as usize, sample.y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }

        let loc = y * self.stride + x * CHANNELS;
        if sample.brightness <= self.pixels[loc] {
            return false;
        }
        self.pixels[loc..loc + CHANNELS].fill(sample.brightness);
        true
    }

    /// Draw every object of the scene on top of the current contents
    pub fn render(&mut self, scene: &Scene, config: &RenderConfig) -> FrameStats {
        let camera = Camera::for_canvas(config, self.width, self.height);
        let limits = scene.limits();
        let mut stats = FrameStats::default();

        for (object, ops) in scene.objects().iter().enumerate() {
            if ops.is_empty() {
                continue;
            }

            let table = RotationTable::build(ops);
            let transformer = Transformer::new(
                ops,
                &table,
                camera,
                limits.field_width,
                limits.field_height,
                config.z_scale,
            );

            for (slot, marker) in ops.markers() {
                let Marker::Show(image) = marker else {
                    continue;
                };
                let Some(field) = scene.image(image) else {
                    trace!("object {} slot {} shows missing image {}", object, slot, image);
                    continue;
                };

                for (x, y, _) in field.lit_pixels() {
                    stats.samples += 1;
                    if self.plot(transformer.apply(slot + 1, x, y)) {
                        stats.plotted += 1;
                    }
                }
            }
        }

        debug!(
            "rendered {} samples, {} plotted on {}x{}",
            stats.samples, stats.plotted, self.width, self.height
        );
        stats
    }
}

/// Three bytes per pixel rounded up to a multiple of four
fn row_stride(width: usize) -> usize {
    (width * CHANNELS).next_multiple_of(4)
}
