pub mod absorb;
pub mod classify;
pub mod error;
pub mod fallback;
pub mod features;
pub mod merge;
pub mod merger;
pub mod part;
pub mod provenance;
pub mod stitch;
pub mod utils;
pub mod wasm;

mod index;


pub use error::{MergeError, Result};
pub use fallback::FallbackMode;
pub use merger::{merge_parts, PartMerger};
pub use part::{ClosedPolygon, Handle, Point, PolygonPart};
