#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown landmark label: {0:?}")]
    UnknownLandmark(String),

    #[error("failed to convert usize value to landmark: {0}")]
    ConvertUSizeToLandmark(usize),

    #[error("landmark tensor has shape ({0}, {1}), expected at least {} columns", crate::keypoint::MIN_LANDMARK_COLUMNS)]
    LandmarkTensorShape(usize, usize),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[cfg(feature = "gui")]
    #[error("failed to convert value to i32")]
    ConvertToI32,

    #[cfg(feature = "gui")]
    #[error("failed to draw line")]
    DrawLine(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to draw circle")]
    DrawCircle(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to allocate frame")]
    CreateFrame(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to show image")]
    ImShow(#[source] opencv::Error),
}
