//! Renderer-independent scene of shapes and its SVG serialisation.

use serde::Serialize;

use super::style::Rgb;

/// Pixel font size per unit of `Shape::Text::size`.
const FONT_SCALE: f64 = 1.5;
/// Baseline-to-baseline distance in font sizes.
const LINE_SPACING: f64 = 1.2;

/// Vertical anchoring of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    /// `position` is the first line's baseline.
    Baseline,
    /// `position` is the top of the block.
    Top,
}

/// A drawable primitive in grid coordinates (y up).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Rgb,
        z: i32,
    },
    /// Rectangle rotated counter-clockwise by `angle` degrees about `anchor`,
    /// its unrotated lower-left corner.
    Rect {
        anchor: (f64, f64),
        width: f64,
        height: f64,
        angle: f64,
        color: Rgb,
        z: i32,
    },
    Text {
        position: (f64, f64),
        content: String,
        size: f64,
        color: Rgb,
        valign: VAlign,
    },
}

impl Shape {
    fn z(&self) -> i32 {
        match self {
            Shape::Circle { z, .. } | Shape::Rect { z, .. } => *z,
            Shape::Text { .. } => 20,
        }
    }
}

/// A collection of shapes over a fixed view extent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    x_range: (f64, f64),
    y_range: (f64, f64),
    background: Rgb,
    scale: f64,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Empty scene over the given extent.
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), background: Rgb, scale: f64) -> Self {
        Self {
            x_range,
            y_range,
            background,
            scale,
            shapes: vec![],
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// All shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Circles as `(center, radius, color)`.
    pub fn circles(&self) -> impl Iterator<Item = ((f64, f64), f64, Rgb)> + '_ {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Circle {
                center,
                radius,
                color,
                ..
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    /// Text contents in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Number of rectangles.
    pub fn num_rects(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { .. }))
            .count()
    }

    fn to_px(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            (x - self.x_range.0) * self.scale,
            (self.y_range.1 - y) * self.scale,
        )
    }

    /// Canvas height in pixels: the view extent, grown downwards to fit
    /// every text block.
    pub fn svg_height(&self) -> f64 {
        let view = (self.y_range.1 - self.y_range.0) * self.scale;
        self.shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text {
                    position,
                    content,
                    size,
                    valign,
                    ..
                } => {
                    let (_, y) = self.to_px(*position);
                    let font_size = size * FONT_SCALE;
                    let last = y + text_lines(content).saturating_sub(1) as f64 * font_size * LINE_SPACING;
                    Some(match valign {
                        VAlign::Top => last + font_size * LINE_SPACING,
                        VAlign::Baseline => last + font_size * (LINE_SPACING - 1.0),
                    })
                }
                _ => None,
            })
            .fold(view, f64::max)
    }

    /// Standalone SVG document.
    pub fn to_svg(&self) -> String {
        let width = (self.x_range.1 - self.x_range.0) * self.scale;
        let height = self.svg_height().ceil();

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.2} {height:.2}\">\n"
        ));
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>\n",
            self.background.to_hex()
        ));

        let mut ordered: Vec<&Shape> = self.shapes.iter().collect();
        ordered.sort_by_key(|s| s.z());

        for shape in ordered {
            match shape {
                Shape::Circle {
                    center,
                    radius,
                    color,
                    ..
                } => {
                    let (cx, cy) = self.to_px(*center);
                    svg.push_str(&format!(
                        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
                        radius * self.scale,
                        color.to_hex()
                    ));
                }
                Shape::Rect {
                    anchor,
                    width,
                    height,
                    angle,
                    color,
                    ..
                } => {
                    let (sin, cos) = angle.to_radians().sin_cos();
                    let corners = [(0.0, 0.0), (*width, 0.0), (*width, *height), (0.0, *height)];
                    let points: Vec<String> = corners
                        .iter()
                        .map(|(dx, dy)| {
                            let world = (anchor.0 + dx * cos - dy * sin, anchor.1 + dx * sin + dy * cos);
                            let (px, py) = self.to_px(world);
                            format!("{px:.2},{py:.2}")
                        })
                        .collect();
                    svg.push_str(&format!(
                        "<polygon points=\"{}\" fill=\"{}\"/>\n",
                        points.join(" "),
                        color.to_hex()
                    ));
                }
                Shape::Text {
                    position,
                    content,
                    size,
                    color,
                    valign,
                } => {
                    let (x, y) = self.to_px(*position);
                    let font_size = size * FONT_SCALE;
                    let baseline = match valign {
                        VAlign::Top => " dominant-baseline=\"hanging\"",
                        VAlign::Baseline => "",
                    };
                    svg.push_str(&format!(
                        "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"monospace\" font-size=\"{font_size:.1}\" fill=\"{}\"{baseline} xml:space=\"preserve\">",
                        color.to_hex()
                    ));
                    // absolute y per line: renderers drop `dy` on empty tspans
                    for (i, line) in content.lines().enumerate() {
                        let line_y = y + i as f64 * font_size * LINE_SPACING;
                        svg.push_str(&format!(
                            "<tspan x=\"{x:.2}\" y=\"{line_y:.2}\">{}</tspan>",
                            escape_xml(line)
                        ));
                    }
                    svg.push_str("</text>\n");
                }
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn text_lines(content: &str) -> usize {
    content.lines().count().max(1)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new((-3.0, 3.0), (0.0, 6.0), Rgb::gray(1.0), 10.0)
    }

    #[test]
    fn test_y_axis_flipped() {
        let mut s = scene();
        s.push(Shape::Circle {
            center: (0.0, 5.0),
            radius: 0.5,
            color: Rgb::gray(0.0),
            z: 1,
        });
        let svg = s.to_svg();
        assert!(svg.contains("cx=\"30.00\" cy=\"10.00\" r=\"5.00\""));
    }

    #[test]
    fn test_rotated_rect_corners() {
        let mut s = scene();
        s.push(Shape::Rect {
            anchor: (0.0, 0.0),
            width: 1.0,
            height: 1.0,
            angle: 90.0,
            color: Rgb::gray(0.5),
            z: 1,
        });
        let svg = s.to_svg();
        // (1,0) rotates to (0,1): px (30, 50)
        assert!(svg.contains("30.00,60.00 30.00,50.00 20.00,50.00 20.00,60.00"));
    }

    #[test]
    fn test_z_order() {
        let mut s = scene();
        s.push(Shape::Circle {
            center: (0.0, 0.0),
            radius: 0.1,
            color: Rgb::gray(0.0),
            z: 10,
        });
        s.push(Shape::Rect {
            anchor: (0.0, 0.0),
            width: 1.0,
            height: 1.0,
            angle: 0.0,
            color: Rgb::gray(0.0),
            z: 1,
        });
        let svg = s.to_svg();
        let rect = svg.find("<polygon").unwrap();
        let circle = svg.find("<circle").unwrap();
        assert!(rect < circle);
    }

    #[test]
    fn test_text_escaped_and_split() {
        let mut s = scene();
        s.push(Shape::Text {
            position: (-3.0, 1.0),
            content: "a < b\nline two".into(),
            size: 10.0,
            color: Rgb::gray(0.0),
            valign: VAlign::Top,
        });
        let svg = s.to_svg();
        assert!(svg.contains("a &lt; b"));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert_eq!(s.texts().count(), 1);
    }

    fn tspan_ys(svg: &str) -> Vec<f64> {
        svg.split("<tspan")
            .skip(1)
            .map(|t| {
                let start = t.find(" y=\"").unwrap() + 4;
                let end = start + t[start..].find('"').unwrap();
                t[start..end].parse().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_blank_lines_keep_spacing() {
        let mut s = scene();
        s.push(Shape::Text {
            position: (-3.0, 5.0),
            content: "\none\n\ntwo".into(),
            size: 10.0,
            color: Rgb::gray(0.0),
            valign: VAlign::Top,
        });
        let ys = tspan_ys(&s.to_svg());
        assert_eq!(ys, vec![10.0, 28.0, 46.0, 64.0]);
    }

    #[test]
    fn test_canvas_grows_to_fit_text() {
        let mut s = scene();
        assert_eq!(s.svg_height(), 60.0);
        s.push(Shape::Text {
            position: (-3.0, 1.0),
            content: "a\nb\nc\nd".into(),
            size: 10.0,
            color: Rgb::gray(0.0),
            valign: VAlign::Top,
        });
        let svg = s.to_svg();
        let last = *tspan_ys(&svg).last().unwrap();
        assert_eq!(last, 50.0 + 3.0 * 18.0);
        assert!(svg.contains(&format!("height=\"{}\"", (last + 18.0).ceil())));
        assert!(last + 15.0 <= s.svg_height());
    }
}
