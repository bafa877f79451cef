//! Detection of bright circular holes in photographs.
//!
//! The input is thresholded on HSV brightness, every bright region is boxed
//! with its minimum-area rectangle and numbered. Regions much larger than the
//! average are taken as two merged holes and numbered twice.

pub mod cv_utils;
pub mod draw;
pub mod error;
pub mod hole;
pub mod hole_detector;
pub mod params;
pub mod readiness;
pub mod utils;

pub use cv_utils::OrientedBox;
pub use error::{DependencyError, HoleError, Result};
pub use hole::{Hole, HoleKind};
pub use hole_detector::{DetectionResult, HoleDetector};
pub use params::DetectorParams;
pub use readiness::{Readiness, VisionGate};
