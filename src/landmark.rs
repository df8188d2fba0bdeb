use crate::error::Error;
use num_traits::FromPrimitive;
use std::{fmt, str::FromStr};

/// Full-body pose landmarks, in model output order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
pub enum Landmark {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

pub const NUM_LANDMARKS: usize = 33;

impl Landmark {
    pub const ALL: [Landmark; NUM_LANDMARKS] = {
        use Landmark::*;
        [
            Nose,
            LeftEyeInner,
            LeftEye,
            LeftEyeOuter,
            RightEyeInner,
            RightEye,
            RightEyeOuter,
            LeftEar,
            RightEar,
            MouthLeft,
            MouthRight,
            LeftShoulder,
            RightShoulder,
            LeftElbow,
            RightElbow,
            LeftWrist,
            RightWrist,
            LeftPinky,
            RightPinky,
            LeftIndex,
            RightIndex,
            LeftThumb,
            RightThumb,
            LeftHip,
            RightHip,
            LeftKnee,
            RightKnee,
            LeftAnkle,
            RightAnkle,
            LeftHeel,
            RightHeel,
            LeftFootIndex,
            RightFootIndex,
        ]
    };

    /// Position of this landmark in a full model output.
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, Error> {
        Self::from_usize(index).ok_or(Error::ConvertUSizeToLandmark(index))
    }

    pub fn label(self) -> &'static str {
        use Landmark::*;
        match self {
            Nose => "nose",
            LeftEyeInner => "left_eye_inner",
            LeftEye => "left_eye",
            LeftEyeOuter => "left_eye_outer",
            RightEyeInner => "right_eye_inner",
            RightEye => "right_eye",
            RightEyeOuter => "right_eye_outer",
            LeftEar => "left_ear",
            RightEar => "right_ear",
            MouthLeft => "mouth_left",
            MouthRight => "mouth_right",
            LeftShoulder => "left_shoulder",
            RightShoulder => "right_shoulder",
            LeftElbow => "left_elbow",
            RightElbow => "right_elbow",
            LeftWrist => "left_wrist",
            RightWrist => "right_wrist",
            LeftPinky => "left_pinky",
            RightPinky => "right_pinky",
            LeftIndex => "left_index",
            RightIndex => "right_index",
            LeftThumb => "left_thumb",
            RightThumb => "right_thumb",
            LeftHip => "left_hip",
            RightHip => "right_hip",
            LeftKnee => "left_knee",
            RightKnee => "right_knee",
            LeftAnkle => "left_ankle",
            RightAnkle => "right_ankle",
            LeftHeel => "left_heel",
            RightHeel => "right_heel",
            LeftFootIndex => "left_foot_index",
            RightFootIndex => "right_foot_index",
        }
    }
}

impl FromStr for Landmark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|landmark| landmark.label() == s)
            .ok_or_else(|| Error::UnknownLandmark(s.to_owned()))
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
