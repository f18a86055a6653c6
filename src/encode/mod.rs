pub mod compress;
pub mod primitive;
pub mod quality;
pub mod resize;
pub mod size;
pub mod target;

pub use compress::compress;
pub use primitive::{CanvasEncoder, EncodePrimitive, EncodeRequest, EncodedResult};
pub use quality::Quality;
pub use resize::{resize, resize_with_quality};
pub use size::{SizeMode, readable_size};
pub use target::{SearchStatus, TargetOutcome, compress_to_target};
