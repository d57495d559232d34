/// Per-object operation lists
use std::fmt;

/// Coordinate axis named by a geometric operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// Plain operation discriminant, as passed to `Scene::set_op`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    ShowImage,
    Hide,
    RotateX,
    RotateY,
    RotateZ,
    TranslateX,
    TranslateY,
    TranslateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    End,
}

/// One slot of an operation list.
///
/// Rotation angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Start a draw group over the image with this index
    ShowImage(usize),
    /// Start a draw group that is never drawn
    Hide,
    Rotate(Axis, f32),
    Translate(Axis, f32),
    Scale(Axis, f32),
    End,
}

impl Operation {
    /// Build an operation from a discriminant and its scalar.
    ///
    /// For `ShowImage` the value is truncated to an image index. A negative or
    /// NaN index becomes `usize::MAX`, which never names a loaded image.
    pub fn new(kind: OpKind, value: f32) -> Self {
        match kind {
            OpKind::ShowImage => Operation::ShowImage(image_index(value)),
            OpKind::Hide => Operation::Hide,
            OpKind::RotateX => Operation::Rotate(Axis::X, value),
            OpKind::RotateY => Operation::Rotate(Axis::Y, value),
            OpKind::RotateZ => Operation::Rotate(Axis::Z, value),
            OpKind::TranslateX => Operation::Translate(Axis::X, value),
            OpKind::TranslateY => Operation::Translate(Axis::Y, value),
            OpKind::TranslateZ => Operation::Translate(Axis::Z, value),
            OpKind::ScaleX => Operation::Scale(Axis::X, value),
            OpKind::ScaleY => Operation::Scale(Axis::Y, value),
            OpKind::ScaleZ => Operation::Scale(Axis::Z, value),
            OpKind::End => Operation::End,
        }
    }

    pub fn kind(&self) -> OpKind {
        match self {
            Operation::ShowImage(_) => OpKind::ShowImage,
            Operation::Hide => OpKind::Hide,
            Operation::Rotate(Axis::X, _) => OpKind::RotateX,
            Operation::Rotate(Axis::Y, _) => OpKind::RotateY,
            Operation::Rotate(Axis::Z, _) => OpKind::RotateZ,
            Operation::Translate(Axis::X, _) => OpKind::TranslateX,
            Operation::Translate(Axis::Y, _) => OpKind::TranslateY,
            Operation::Translate(Axis::Z, _) => OpKind::TranslateZ,
            Operation::Scale(Axis::X, _) => OpKind::ScaleX,
            Operation::Scale(Axis::Y, _) => OpKind::ScaleY,
            Operation::Scale(Axis::Z, _) => OpKind::ScaleZ,
            Operation::End => OpKind::End,
        }
    }

    /// True for operations that open a draw group
    pub fn is_marker(&self) -> bool {
        matches!(self, Operation::ShowImage(_) | Operation::Hide)
    }
}

fn image_index(value: f32) -> usize {
    if value >= 0.0 {
        value as usize
    } else {
        usize::MAX
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ShowImage(image) => write!(f, "show {image}"),
            Operation::Hide => f.write_str("hide"),
            Operation::Rotate(axis, v) => write!(f, "rotate {axis} {v}"),
            Operation::Translate(axis, v) => write!(f, "translate {axis} {v}"),
            Operation::Scale(axis, v) => write!(f, "scale {axis} {v}"),
            Operation::End => f.write_str("end"),
        }
    }
}

/// Draw group opened by a marker slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Show(usize),
    Hide,
}

/// Fixed number of operation slots, terminated by the first `End`
#[derive(Debug, Clone, PartialEq)]
pub struct OpList {
    slots: Vec<Operation>,
}

impl OpList {
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![Operation::End; count],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Overwrite a slot. Returns false, leaving the list untouched, when the
    /// slot is out of range.
    pub fn set(&mut self, slot: usize, op: Operation) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = op;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, slot: usize) -> Option<Operation> {
        self.slots.get(slot).copied()
    }

    /// An object with `End` in its first slot has nothing to draw
    pub fn is_empty(&self) -> bool {
        matches!(self.slots.first(), None | Some(Operation::End))
    }

    pub fn clear(&mut self) {
        self.slots.fill(Operation::End);
    }

    /// Slots before the first `End`
    pub fn active(&self) -> impl Iterator<Item = (usize, Operation)> + '_ {
        self.slots
            .iter()
            .copied()
            .enumerate()
            .take_while(|(_, op)| *op != Operation::End)
    }

    /// Every draw-group marker before the first `End`
    pub fn markers(&self) -> impl Iterator<Item = (usize, Marker)> + '_ {
        self.active().filter_map(|(slot, op)| match op {
            Operation::ShowImage(image) => Some((slot, Marker::Show(image))),
            Operation::Hide => Some((slot, Marker::Hide)),
            _ => None,
        })
    }

    /// Geometric operations from `start` up to the next marker or `End`
    pub fn group(&self, start: usize) -> impl Iterator<Item = (usize, Operation)> + '_ {
        self.slots
            .iter()
            .copied()
            .enumerate()
            .skip(start)
            .take_while(|(_, op)| *op != Operation::End && !op.is_marker())
    }
}
