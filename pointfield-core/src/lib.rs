/// Pointfield Core Library - software point-cloud pipeline
///
/// Loads bitmaps as intensity fields, pushes every lit pixel through a
/// per-object list of rotate/translate/scale operations, projects it through
/// a fixed perspective camera and composites the result into a grayscale
/// framebuffer using a brightest-wins rule.

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod image;
pub mod op;
pub mod projection;
pub mod scene;
pub mod script;
pub mod transform;

// Re-export commonly used types
pub use animation::CrateAnimation;
pub use canvas::{Canvas, FrameStats};
pub use config::{RenderConfig, SceneLimits, ZScale};
pub use error::{ConfigError, ImageError, ScriptError};
pub use image::ImageField;
pub use op::{Axis, Marker, OpKind, OpList, Operation};
pub use projection::{Camera, ScreenSample};
pub use scene::Scene;
pub use script::SceneScript;
pub use transform::{RotationTable, Transformer};
