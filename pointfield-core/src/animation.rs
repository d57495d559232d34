/// Per-tick pose of the spinning crate demo
use crate::op::{Axis, Operation};
use crate::scene::Scene;

/// Depth every frame starts from before the user's zoom is applied
pub const CRATE_DEPTH: f32 = 64.0;
/// Degrees added to both rotations every tick
pub const SPIN_PER_TICK: f32 = 1.0;
/// Degrees of rotation per unit of pointer drag
pub const DRAG_GAIN: f32 = -3.0;
/// Depth change per wheel notch
pub const ZOOM_STEP: f32 = 10.0;

/// Rotation (in degrees) and zoom of the crate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrateAnimation {
    pub x_rot: f32,
    pub y_rot: f32,
    pub z_loc: f32,
}

impl CrateAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick. `drag` is the pointer movement since the last tick
    /// while the button is held, in pointer units with y pointing up.
    pub fn tick(&mut self, drag: Option<(f32, f32)>) {
        self.x_rot += SPIN_PER_TICK;
        self.y_rot += SPIN_PER_TICK;

        if let Some((dx, dy)) = drag {
            self.x_rot += dy * DRAG_GAIN;
            self.y_rot += dx * DRAG_GAIN;
        }
    }

    pub fn zoom_in(&mut self) {
        self.z_loc += ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.z_loc -= ZOOM_STEP;
    }

    /// The operation list for this pose
    pub fn operations(&self, image: usize) -> [Operation; 5] {
        [
            Operation::ShowImage(image),
            Operation::Translate(Axis::Z, CRATE_DEPTH),
            Operation::Rotate(Axis::X, self.x_rot),
            Operation::Rotate(Axis::Y, self.y_rot),
            Operation::Translate(Axis::Z, self.z_loc),
        ]
    }

    /// Write this pose into the leading slots of `object`
    pub fn apply(&self, scene: &mut Scene, object: usize, image: usize) {
        for (slot, op) in self.operations(image).into_iter().enumerate() {
            scene.set_operation(object, slot, op);
        }
    }
}
