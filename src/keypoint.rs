use crate::{
    error::Error,
    landmark::{Landmark, NUM_LANDMARKS},
};
use ndarray::{ArrayView2, Axis};
use ordered_float::NotNan;
use tracing::debug;

/// Columns of a landmark tensor row: x, y, z, visibility and optionally presence.
pub const MIN_LANDMARK_COLUMNS: usize = 4;
const VISIBILITY_COLUMN: usize = 3;

/// A named, scored 2D body landmark for one frame.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keypoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

impl Keypoint {
    pub fn new<S>(name: S, x: f32, y: f32, score: f32) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            x,
            y,
            score,
        }
    }

    /// Whether the detector is confident enough in this keypoint to draw it.
    #[inline]
    pub fn is_visible(&self, min_score: f32) -> bool {
        self.score >= min_score
    }

    pub fn landmark(&self) -> Option<Landmark> {
        self.name.parse().ok()
    }
}

/// How keypoint coordinates relate to the viewport they're drawn into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordinateSpace {
    /// Coordinates are already in viewport units.
    Pixel,
    /// Coordinates are fractions of the viewport, in `[0, 1]`.
    Normalized,
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::Pixel
    }
}

impl CoordinateSpace {
    pub fn to_viewport(self, x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
        match self {
            Self::Pixel => (x, y),
            Self::Normalized => (x * width, y * height),
        }
    }
}

/// How the visibility column of a landmark tensor maps to a score.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScoreActivation {
    /// Visibility is already a probability.
    Identity,
    /// Visibility is a raw logit, as emitted by the lite landmark model.
    Sigmoid,
}

impl ScoreActivation {
    fn apply(self, value: f32) -> f32 {
        match self {
            Self::Identity => value,
            Self::Sigmoid => 1.0 / (1.0 + (-value).exp()),
        }
    }
}

/// Convert a `[rows, columns]` landmark tensor into keypoints.
///
/// Rows are taken in vocabulary order. Rows past the 33 body landmarks (the
/// auxiliary landmarks some models append) are dropped; fewer rows produce a
/// shorter keypoint list. A NaN coordinate or visibility rejects the whole
/// tensor.
pub fn keypoints_from_landmarks(
    landmarks: ArrayView2<f32>,
    activation: ScoreActivation,
) -> Result<Vec<Keypoint>, Error> {
    let (rows, columns) = landmarks.dim();
    if columns < MIN_LANDMARK_COLUMNS {
        return Err(Error::LandmarkTensorShape(rows, columns));
    }
    if rows > NUM_LANDMARKS {
        debug!(
            message = "dropping auxiliary landmarks",
            rows,
            kept = NUM_LANDMARKS
        );
    }

    landmarks
        .axis_iter(Axis(0))
        .take(NUM_LANDMARKS)
        .enumerate()
        .map(|(i, row)| {
            let landmark = Landmark::from_index(i)?;
            let x = NotNan::new(row[0]).map_err(|e| Error::ConstructNotNan(e, row[0]))?;
            let y = NotNan::new(row[1]).map_err(|e| Error::ConstructNotNan(e, row[1]))?;
            let visibility = row[VISIBILITY_COLUMN];
            let visibility =
                NotNan::new(visibility).map_err(|e| Error::ConstructNotNan(e, visibility))?;
            Ok(Keypoint::new(
                landmark.label(),
                x.into_inner(),
                y.into_inner(),
                activation.apply(visibility.into_inner()),
            ))
        })
        .collect()
}
