/// Camera model and perspective projection
use nalgebra::Point3;

use crate::config::RenderConfig;

/// Base brightness of a point at z = 0
const BRIGHTNESS_BASE: f32 = 128.0;
/// Brightness swing between z = 0 and either clip bound
const BRIGHTNESS_RANGE: f32 = 127.0;

/// A projected point: screen position plus brightness.
///
/// Brightness 0 means the point was culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSample {
    pub x: i32,
    pub y: i32,
    pub brightness: u8,
}

impl ScreenSample {
    pub fn is_visible(&self) -> bool {
        self.brightness > 0
    }
}

/// Fixed perspective camera looking down the z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub perspective: f32,
    pub lens: f32,
    pub distance: f32,
    pub center_x: i32,
    pub center_y: i32,
}

impl Camera {
    /// Camera constants from `config`, centred on a canvas of the given size
    pub fn for_canvas(config: &RenderConfig, width: usize, height: usize) -> Self {
        Self {
            perspective: config.perspective,
            lens: config.camera_lens,
            distance: config.camera_distance,
            center_x: (width / 2) as i32,
            center_y: (height / 2) as i32,
        }
    }

    /// Project an object-space point to the screen
    pub fn project(&self, point: &Point3<f32>) -> ScreenSample {
        let scale = self.perspective / (self.perspective - point.z);
        ScreenSample {
            x: round(point.x * scale + self.center_x as f32),
            y: round(point.y * scale + self.center_y as f32),
            brightness: self.brightness(point.z),
        }
    }

    /// Depth shading: brighter towards the lens, dimmer towards the camera,
    /// 0 at or beyond either bound
    pub fn brightness(&self, z: f32) -> u8 {
        if z >= self.lens || z <= self.distance {
            return 0;
        }
        let value = if z >= 0.0 {
            BRIGHTNESS_BASE + z / self.lens * BRIGHTNESS_RANGE
        } else {
            BRIGHTNESS_BASE - z / self.distance * BRIGHTNESS_RANGE
        };
        value as u8
    }
}

impl Default for Camera {
    fn default() -> Self {
        let config = RenderConfig::default();
        Self::for_canvas(&config, config.canvas_width, config.canvas_height)
    }
}

/// Round half up
#[inline]
fn round(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.center_x, 320);
        assert_eq!(camera.center_y, 200);
        assert_eq!(camera.perspective, 350.0);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::default();
        let sample = camera.project(&Point3::origin());
        assert_eq!(sample, ScreenSample { x: 320, y: 200, brightness: 128 });
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(round(0.5), 1);
        assert_eq!(round(-0.5), 0);
        assert_eq!(round(-1.5), -1);
        assert_eq!(round(2.49), 2);
    }

    #[test]
    fn test_perspective_grows_towards_camera() {
        let camera = Camera::default();
        let mut last = 0;
        for z in [-150.0, -50.0, 0.0, 50.0, 100.0, 150.0, 199.0] {
            let sample = camera.project(&Point3::new(40.0, -30.0, z));
            let dx = (sample.x - camera.center_x).abs();
            assert!(dx > last, "z = {z}: {dx} <= {last}");
            last = dx;
        }
    }

    #[test]
    fn test_brightness_clips_at_bounds() {
        let camera = Camera::default();
        assert_eq!(camera.brightness(200.0), 0);
        assert_eq!(camera.brightness(-200.0), 0);
        assert_eq!(camera.brightness(250.0), 0);
        assert_eq!(camera.brightness(-1000.0), 0);
        assert_eq!(camera.brightness(f32::NAN), 0);
    }

    #[test]
    fn test_brightness_inside_bounds() {
        let camera = Camera::default();
        assert_eq!(camera.brightness(0.0), 128);
        assert_eq!(camera.brightness(100.0), 191);
        assert_eq!(camera.brightness(-100.0), 64);
        let mut z = -199.5;
        while z < 200.0 {
            assert!(camera.brightness(z) > 0, "z = {z}");
            z += 0.5;
        }
    }
}
