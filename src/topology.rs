use crate::landmark::Landmark::{self, *};

pub const NUM_EDGES: usize = 24;

/// Skeleton connections, drawn in this order.
pub const SKELETON_EDGES: [(Landmark, Landmark); NUM_EDGES] = [
    // torso
    (LeftShoulder, RightShoulder),
    (LeftHip, RightHip),
    (LeftShoulder, LeftHip),
    (RightShoulder, RightHip),
    // arms
    (LeftShoulder, LeftElbow),
    (LeftElbow, LeftWrist),
    (RightShoulder, RightElbow),
    (RightElbow, RightWrist),
    // hands
    (LeftWrist, LeftPinky),
    (LeftWrist, LeftIndex),
    (LeftWrist, LeftThumb),
    (RightWrist, RightPinky),
    (RightWrist, RightIndex),
    (RightWrist, RightThumb),
    // legs
    (LeftHip, LeftKnee),
    (LeftKnee, LeftAnkle),
    (RightHip, RightKnee),
    (RightKnee, RightAnkle),
    // feet
    (LeftAnkle, LeftHeel),
    (LeftAnkle, LeftFootIndex),
    (LeftHeel, LeftFootIndex),
    (RightAnkle, RightHeel),
    (RightAnkle, RightFootIndex),
    (RightHeel, RightFootIndex),
];

#[cfg(test)]
mod tests {
    use super::SKELETON_EDGES;
    use crate::landmark::Landmark;
    use std::collections::HashSet;

    #[test]
    fn no_self_loops() {
        assert!(SKELETON_EDGES.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn no_duplicate_edges() {
        let unique = SKELETON_EDGES
            .iter()
            .map(|&(a, b)| if a.idx() < b.idx() { (a, b) } else { (b, a) })
            .collect::<HashSet<_>>();
        assert_eq!(unique.len(), SKELETON_EDGES.len());
    }

    #[test]
    fn face_is_not_connected() {
        let face = [
            Landmark::Nose,
            Landmark::LeftEye,
            Landmark::RightEye,
            Landmark::LeftEar,
            Landmark::RightEar,
            Landmark::MouthLeft,
            Landmark::MouthRight,
        ];
        assert!(SKELETON_EDGES
            .iter()
            .all(|(a, b)| !face.contains(a) && !face.contains(b)));
    }

    #[test]
    fn torso_comes_first() {
        assert_eq!(
            SKELETON_EDGES[0],
            (Landmark::LeftShoulder, Landmark::RightShoulder)
        );
        assert_eq!(
            SKELETON_EDGES[SKELETON_EDGES.len() - 1],
            (Landmark::RightHeel, Landmark::RightFootIndex)
        );
    }
}
