//! Skeleton overlays for camera-detected body keypoints.
//!
//! [`render`] projects one frame of labeled, scored keypoints onto a
//! viewport and returns a [`Drawing`] of lines and circles to composite over
//! the camera preview.

pub mod drawing;
pub mod error;
pub mod keypoint;
pub mod landmark;
pub mod overlay;
#[cfg(feature = "gui")]
pub mod raster;
pub mod topology;

pub use drawing::{Color, Drawing, Point, Shape, Style};
pub use error::Error;
pub use keypoint::{keypoints_from_landmarks, CoordinateSpace, Keypoint, ScoreActivation};
pub use landmark::{Landmark, NUM_LANDMARKS};
pub use overlay::{render, OverlayOptions, PoseOverlay, DEFAULT_MIN_SCORE};
pub use topology::SKELETON_EDGES;
