/// Operation-list transforms applied to image-field points
use nalgebra::{Point2, Point3, UnitComplex};

use crate::config::ZScale;
use crate::op::{Axis, OpList, Operation};
use crate::projection::{Camera, ScreenSample};

/// Unit-circle rotation for an angle in degrees, or `None` when the angle
/// has no defined sine/cosine (NaN or infinite)
pub fn unit_circle(degrees: f32) -> Option<UnitComplex<f32>> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    if sin.is_nan() || cos.is_nan() {
        return None;
    }
    Some(UnitComplex::from_cos_sin_unchecked(cos, sin))
}

/// Rotate the point (a, b) in its plane. A NaN angle leaves it unchanged.
pub fn rotate(a: f32, b: f32, degrees: f32) -> (f32, f32) {
    match unit_circle(degrees) {
        Some(rotation) => turn(&rotation, a, b),
        None => (a, b),
    }
}

#[inline]
fn turn(rotation: &UnitComplex<f32>, a: f32, b: f32) -> (f32, f32) {
    let p = rotation * Point2::new(a, b);
    (p.x, p.y)
}

/// Sine/cosine for every rotation slot of one operation list, computed once
/// per frame rather than once per pixel
#[derive(Debug, Clone)]
pub struct RotationTable {
    entries: Vec<Option<UnitComplex<f32>>>,
}

impl RotationTable {
    pub fn build(ops: &OpList) -> Self {
        let mut entries = vec![None; ops.capacity()];
        for (slot, op) in ops.active() {
            if let Operation::Rotate(_, degrees) = op {
                entries[slot] = unit_circle(degrees);
            }
        }
        Self { entries }
    }

    pub fn get(&self, slot: usize) -> Option<&UnitComplex<f32>> {
        self.entries.get(slot).and_then(Option::as_ref)
    }

    /// Number of slots holding a usable rotation
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Applies one object's operation list to image-field pixels
pub struct Transformer<'a> {
    ops: &'a OpList,
    table: &'a RotationTable,
    camera: Camera,
    half_width: f32,
    half_height: f32,
    z_scale: ZScale,
}

impl<'a> Transformer<'a> {
    pub fn new(
        ops: &'a OpList,
        table: &'a RotationTable,
        camera: Camera,
        field_width: usize,
        field_height: usize,
        z_scale: ZScale,
    ) -> Self {
        Self {
            ops,
            table,
            camera,
            half_width: (field_width / 2) as f32,
            half_height: (field_height / 2) as f32,
            z_scale,
        }
    }

    /// Object-space position of pixel (x, y) after the operations from
    /// `start` up to the next marker or `End`
    pub fn transform_point(&self, start: usize, x: usize, y: usize) -> Point3<f32> {
        let mut p = Point3::new(x as f32 - self.half_width, y as f32 - self.half_height, 0.0);

        for (slot, op) in self.ops.group(start) {
            match op {
                Operation::Rotate(axis, _) => {
                    let Some(rotation) = self.table.get(slot) else {
                        continue;
                    };
                    match axis {
                        Axis::X => (p.y, p.z) = turn(rotation, p.y, p.z),
                        Axis::Y => (p.x, p.z) = turn(rotation, p.x, p.z),
                        Axis::Z => (p.x, p.y) = turn(rotation, p.x, p.y),
                    }
                }
                Operation::Translate(axis, v) => *self.coord(&mut p, axis) += v,
                Operation::Scale(axis, v) => *self.scaled_coord(&mut p, axis) *= v,
                Operation::ShowImage(_) | Operation::Hide | Operation::End => break,
            }
        }

        p
    }

    /// Screen position and brightness of pixel (x, y)
    pub fn apply(&self, start: usize, x: usize, y: usize) -> ScreenSample {
        self.camera.project(&self.transform_point(start, x, y))
    }

    fn coord<'p>(&self, p: &'p mut Point3<f32>, axis: Axis) -> &'p mut f32 {
        match axis {
            Axis::X => &mut p.x,
            Axis::Y => &mut p.y,
            Axis::Z => &mut p.z,
        }
    }

    fn scaled_coord<'p>(&self, p: &'p mut Point3<f32>, axis: Axis) -> &'p mut f32 {
        match (axis, self.z_scale) {
            (Axis::Z, ZScale::Legacy) => &mut p.y,
            _ => self.coord(p, axis),
        }
    }
}
