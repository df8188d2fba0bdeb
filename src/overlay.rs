use crate::{
    drawing::{Color, Drawing, Point, Shape, Style},
    keypoint::{CoordinateSpace, Keypoint},
    landmark::Landmark,
    topology::SKELETON_EDGES,
};
use tracing::trace;

pub const DEFAULT_MIN_SCORE: f32 = 0.8;
pub const MARKER_RADIUS: f32 = 6.0;

const GREEN: Color = Color::rgb(0, 255, 0);
const YELLOW: Color = Color::rgb(255, 255, 0);

pub const EDGE_STYLE: Style = Style {
    stroke: YELLOW,
    stroke_width: 2.0,
    fill: None,
};

pub const MARKER_STYLE: Style = Style {
    stroke: GREEN,
    stroke_width: 1.0,
    fill: Some(GREEN),
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OverlayOptions {
    /// Flip horizontally, for front camera previews.
    pub mirror: bool,
    /// Keypoints scoring below this are not drawn.
    pub min_score: f32,
    pub space: CoordinateSpace,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            mirror: false,
            min_score: DEFAULT_MIN_SCORE,
            space: CoordinateSpace::default(),
        }
    }
}

/// Draws a skeleton over one frame of keypoints.
#[derive(Debug, Copy, Clone, Default)]
pub struct PoseOverlay {
    options: OverlayOptions,
}

impl PoseOverlay {
    pub fn new(options: OverlayOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn render(
        &self,
        keypoints: Option<&[Keypoint]>,
        width: f32,
        height: f32,
    ) -> Option<Drawing> {
        render(keypoints, width, height, &self.options)
    }
}

/// Project `keypoints` onto a `width` x `height` viewport.
///
/// Returns `None` when there is nothing to draw into: no keypoints, or a
/// viewport that isn't strictly positive. Edges are painted first in
/// [`SKELETON_EDGES`] order, then one marker per visible keypoint in input
/// order. Keypoints with an unknown name are still drawn as markers but never
/// take part in an edge.
pub fn render(
    keypoints: Option<&[Keypoint]>,
    width: f32,
    height: f32,
    options: &OverlayOptions,
) -> Option<Drawing> {
    let keypoints = keypoints?;
    // also rejects NaN
    if !(width > 0.0 && height > 0.0) {
        return None;
    }

    let project = |keypoint: &Keypoint| {
        let (x, y) = options
            .space
            .to_viewport(keypoint.x, keypoint.y, width, height);
        Point::new(if options.mirror { width - x } else { x }, y)
    };

    let mut drawing = Drawing::new(width, height);

    for &(a, b) in SKELETON_EDGES.iter() {
        match (resolve(keypoints, a), resolve(keypoints, b)) {
            (Some(from), Some(to)) => {
                if from.is_visible(options.min_score) && to.is_visible(options.min_score) {
                    drawing.push(Shape::Line {
                        from: project(from),
                        to: project(to),
                        style: EDGE_STYLE,
                    });
                }
            }
            _ => trace!(
                message = "skipping edge with unresolved endpoint",
                from = a.label(),
                to = b.label()
            ),
        }
    }

    for keypoint in keypoints
        .iter()
        .filter(|keypoint| keypoint.is_visible(options.min_score))
    {
        drawing.push(Shape::Circle {
            center: project(keypoint),
            radius: MARKER_RADIUS,
            style: MARKER_STYLE,
        });
    }

    Some(drawing)
}

/// Find the keypoint for `landmark`: at its model position if the label
/// matches there, otherwise the first keypoint carrying the label.
fn resolve(keypoints: &[Keypoint], landmark: Landmark) -> Option<&Keypoint> {
    let label = landmark.label();
    keypoints
        .get(landmark.idx())
        .filter(|keypoint| keypoint.name == label)
        .or_else(|| keypoints.iter().find(|keypoint| keypoint.name == label))
}
