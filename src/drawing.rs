//! Vector description of an overlay frame: lines and circles sized to a viewport.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Color,
    pub stroke_width: f32,
    pub fill: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Line { from: Point, to: Point, style: Style },
    Circle { center: Point, radius: f32, style: Style },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    width: f32,
    height: f32,
    shapes: Vec<Shape>,
}

impl Drawing {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub(crate) fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.shapes.iter().filter_map(|shape| match *shape {
            Shape::Line { from, to, .. } => Some((from, to)),
            Shape::Circle { .. } => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point, f32)> + '_ {
        self.shapes.iter().filter_map(|shape| match *shape {
            Shape::Circle { center, radius, .. } => Some((center, radius)),
            Shape::Line { .. } => None,
        })
    }

    /// Render as a standalone SVG document that ignores pointer events.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" pointer-events="none">"#,
            w = self.width,
            h = self.height,
        )?;
        for shape in &self.shapes {
            match shape {
                Shape::Line { from, to, style } => writeln!(
                    f,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    from.x, from.y, to.x, to.y, style.stroke, style.stroke_width,
                )?,
                Shape::Circle {
                    center,
                    radius,
                    style,
                } => {
                    let fill = style
                        .fill
                        .map_or_else(|| "none".to_owned(), |fill| fill.to_string());
                    writeln!(
                        f,
                        r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                        center.x, center.y, radius, fill, style.stroke, style.stroke_width,
                    )?
                }
            }
        }
        write!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Drawing, Point, Shape, Style};

    const STYLE: Style = Style {
        stroke: Color::rgb(255, 255, 0),
        stroke_width: 2.0,
        fill: None,
    };

    fn sample() -> Drawing {
        let mut drawing = Drawing::new(100.0, 50.0);
        drawing.push(Shape::Line {
            from: Point::new(1.0, 2.0),
            to: Point::new(3.0, 4.0),
            style: STYLE,
        });
        drawing.push(Shape::Circle {
            center: Point::new(5.0, 6.0),
            radius: 5.0,
            style: Style {
                fill: Some(Color::rgb(0, 255, 0)),
                ..STYLE
            },
        });
        drawing
    }

    #[test]
    fn color_hex() {
        assert_eq!(Color::rgb(0, 255, 16).to_string(), "#00ff10");
    }

    #[test]
    fn lines_and_circles_are_split() {
        let drawing = sample();
        assert_eq!(
            drawing.lines().collect::<Vec<_>>(),
            vec![(Point::new(1.0, 2.0), Point::new(3.0, 4.0))]
        );
        assert_eq!(
            drawing.circles().collect::<Vec<_>>(),
            vec![(Point::new(5.0, 6.0), 5.0)]
        );
    }

    #[test]
    fn svg_is_sized_and_passthrough() {
        let svg = sample().to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="100" height="50" viewBox="0 0 100 50""#));
        assert!(svg.contains(r#"pointer-events="none""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn svg_keeps_paint_order() {
        let svg = sample().to_svg();
        let line = svg.find("<line").unwrap();
        let circle = svg.find("<circle").unwrap();
        assert!(line < circle);
        assert!(svg.contains(r##"<circle cx="5" cy="6" r="5" fill="#00ff00""##));
    }

    #[test]
    fn json_tags_shapes() {
        let value = serde_json::to_value(&sample()).unwrap();
        assert_eq!(value["shapes"][0]["kind"], "line");
        assert_eq!(value["shapes"][1]["kind"], "circle");
        assert_eq!(value["width"], 100.0);
    }

    #[test]
    fn empty_drawing() {
        let drawing = Drawing::new(10.0, 10.0);
        assert!(drawing.is_empty());
        assert_eq!(drawing.lines().count(), 0);
    }
}
