//! Rasterize a [`Drawing`] with OpenCV.

use crate::{
    drawing::{Color, Drawing, Point, Shape},
    error::Error,
};
use num_traits::ToPrimitive;
use opencv::{
    core::{Mat, Point2i, Scalar, CV_8UC3},
    imgproc::{FILLED, LINE_8},
    prelude::MatExprTrait,
};

fn to_point2i(point: Point) -> Result<Point2i, Error> {
    Ok(Point2i::new(
        point.x.round().to_i32().ok_or(Error::ConvertToI32)?,
        point.y.round().to_i32().ok_or(Error::ConvertToI32)?,
    ))
}

fn to_i32(value: f32) -> Result<i32, Error> {
    value.round().to_i32().ok_or(Error::ConvertToI32)
}

/// OpenCV wants BGR.
fn to_scalar(Color { r, g, b }: Color) -> Scalar {
    Scalar::from((f64::from(b), f64::from(g), f64::from(r)))
}

/// A black frame the size of `drawing`'s viewport.
pub fn blank_frame(drawing: &Drawing) -> Result<Mat, Error> {
    Mat::zeros(to_i32(drawing.height())?, to_i32(drawing.width())?, CV_8UC3)
        .and_then(|expr| expr.to_mat())
        .map_err(Error::CreateFrame)
}

/// Paint every shape of `drawing` onto `out_frame`, in order.
pub fn draw(drawing: &Drawing, out_frame: &mut Mat) -> Result<(), Error> {
    for shape in drawing.shapes() {
        match *shape {
            Shape::Line { from, to, style } => opencv::imgproc::line(
                out_frame,
                to_point2i(from)?,
                to_point2i(to)?,
                to_scalar(style.stroke),
                to_i32(style.stroke_width)?, // thickness
                LINE_8,                      // line_type
                0,                           // shift
            )
            .map_err(Error::DrawLine)?,
            Shape::Circle {
                center,
                radius,
                style,
            } => {
                let center = to_point2i(center)?;
                let radius = to_i32(radius)?;
                if let Some(fill) = style.fill {
                    opencv::imgproc::circle(
                        out_frame,
                        center,
                        radius,
                        to_scalar(fill),
                        FILLED,
                        LINE_8,
                        0,
                    )
                    .map_err(Error::DrawCircle)?;
                }
                opencv::imgproc::circle(
                    out_frame,
                    center,
                    radius,
                    to_scalar(style.stroke),
                    to_i32(style.stroke_width)?,
                    LINE_8,
                    0,
                )
                .map_err(Error::DrawCircle)?;
            }
        }
    }
    Ok(())
}

pub fn show(window: &str, frame: &Mat) -> Result<(), Error> {
    opencv::highgui::imshow(window, frame).map_err(Error::ImShow)
}
