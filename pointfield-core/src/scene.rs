/// Scene state: image fields and per-object operation lists
use log::{trace, warn};
use std::path::Path;

use crate::config::SceneLimits;
use crate::image::ImageField;
use crate::op::{OpKind, OpList, Operation};

/// Owns every image field and operation list, indexed by small integer ids
#[derive(Debug, Clone)]
pub struct Scene {
    limits: SceneLimits,
    images: Vec<ImageField>,
    objects: Vec<OpList>,
}

impl Scene {
    pub fn new(limits: SceneLimits) -> Self {
        let limits = limits.normalized();
        Self {
            images: (0..limits.images)
                .map(|_| ImageField::blank(limits.field_width, limits.field_height))
                .collect(),
            objects: (0..limits.objects)
                .map(|_| OpList::with_slots(limits.op_slots))
                .collect(),
            limits,
        }
    }

    pub fn limits(&self) -> &SceneLimits {
        &self.limits
    }

    /// Load a bitmap into image slot `image`.
    ///
    /// A missing or unreadable file is not fatal: the slot keeps its current
    /// contents and the object simply draws nothing. Returns whether the
    /// image was loaded.
    pub fn load_image(&mut self, image: usize, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Some(field) = self.images.get_mut(image) else {
            warn!("image slot {} out of range, not loading {}", image, path.display());
            return false;
        };

        match ImageField::from_file(path, field.width(), field.height()) {
            Ok(loaded) => {
                *field = loaded;
                true
            }
            Err(e) => {
                warn!("failed to load image {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Replace image slot `image`. Fields whose size differs from the
    /// scene's field size are ignored.
    pub fn set_image(&mut self, image: usize, field: ImageField) -> bool {
        let fits = field.width() == self.limits.field_width
            && field.height() == self.limits.field_height;
        match self.images.get_mut(image) {
            Some(slot) if fits => {
                *slot = field;
                true
            }
            _ => false,
        }
    }

    pub fn image(&self, image: usize) -> Option<&ImageField> {
        self.images.get(image)
    }

    pub fn images(&self) -> &[ImageField] {
        &self.images
    }

    pub fn object(&self, object: usize) -> Option<&OpList> {
        self.objects.get(object)
    }

    pub fn objects(&self) -> &[OpList] {
        &self.objects
    }

    /// Write one operation slot. Out-of-range object ids or slots are ignored.
    pub fn set_op(&mut self, object: usize, slot: usize, kind: OpKind, value: f32) {
        self.set_operation(object, slot, Operation::new(kind, value));
    }

    /// Typed form of `set_op`
    pub fn set_operation(&mut self, object: usize, slot: usize, op: Operation) {
        let written = self
            .objects
            .get_mut(object)
            .is_some_and(|ops| ops.set(slot, op));
        if !written {
            trace!("ignoring {} for object {} slot {}", op, object, slot);
        }
    }

    /// Reset an object's list to all `End`
    pub fn clear_object(&mut self, object: usize) {
        if let Some(ops) = self.objects.get_mut(object) {
            ops.clear();
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Axis;

    fn small_limits() -> SceneLimits {
        SceneLimits {
            objects: 2,
            images: 1,
            op_slots: 4,
            field_width: 8,
            field_height: 8,
        }
    }

    #[test]
    fn test_new_scene_is_blank() {
        let scene = Scene::new(small_limits());
        assert_eq!(scene.objects().len(), 2);
        assert_eq!(scene.images().len(), 1);
        assert!(scene.objects().iter().all(OpList::is_empty));
        assert!(scene.image(0).unwrap().is_blank());
    }

    #[test]
    fn test_set_op_writes_slot() {
        let mut scene = Scene::new(small_limits());
        scene.set_op(1, 2, OpKind::RotateY, 45.0);
        assert_eq!(
            scene.object(1).unwrap().get(2),
            Some(Operation::Rotate(Axis::Y, 45.0))
        );
    }

    #[test_log::test]
    fn test_set_op_out_of_range_is_noop() {
        let mut scene = Scene::new(small_limits());
        scene.set_op(0, 0, OpKind::ShowImage, 0.0);
        let before = scene.objects().to_vec();

        scene.set_op(2, 0, OpKind::Hide, 0.0);
        scene.set_op(0, 4, OpKind::TranslateX, 1.0);
        scene.set_op(usize::MAX, usize::MAX, OpKind::End, 0.0);

        assert_eq!(scene.objects(), &before[..]);
    }

    #[test_log::test]
    fn test_missing_image_keeps_field() {
        let mut scene = Scene::new(small_limits());
        assert!(!scene.load_image(0, "/nonexistent/crate.bmp"));
        assert!(!scene.load_image(3, "/nonexistent/crate.bmp"));
        assert!(scene.image(0).unwrap().is_blank());
    }

    #[test]
    fn test_load_image_from_file() {
        use std::io::Write;

        let mut bytes = vec![0u8; 10];
        bytes.extend(std::iter::repeat(0xFF).take(4 * 4 * 3));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let mut scene = Scene::new(small_limits());
        assert!(scene.load_image(0, file.path()));
        assert_eq!(scene.image(0).unwrap().lit_pixels().count(), 16);
    }

    #[test]
    fn test_set_image_checks_size() {
        let mut scene = Scene::new(small_limits());
        assert!(!scene.set_image(0, ImageField::from_intensities(2, 2, &[255; 4])));
        assert!(scene.set_image(0, ImageField::from_intensities(8, 8, &[255; 64])));
        assert!(!scene.set_image(1, ImageField::blank(8, 8)));
    }

    #[test]
    fn test_clear_object() {
        let mut scene = Scene::new(small_limits());
        scene.set_op(0, 0, OpKind::ShowImage, 0.0);
        scene.clear_object(0);
        assert!(scene.object(0).unwrap().is_empty());
    }
}
