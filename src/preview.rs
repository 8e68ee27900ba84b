use egui::{epaint::CubicBezierShape, Color32, Pos2, Shape, Stroke, Vec2};

/// Control points of the preview curve in a unit frame: x runs from the press point
/// (0) to the pointer (1) and is scaled by the drag length, y is in pixels.
const CURVE: [(f32, f32); 4] = [(0., 0.), (0.33, 100.), (0.66, -50.), (1., 0.)];

/// Notched arrow with its tip at the origin, pointing along +x.
const ARROW: [(f32, f32); 4] = [(0., 0.), (-16., 10.), (-8., 0.), (-16., -10.)];

/// Transient feedback drawn while an edge is dragged out of a vertex.
///
/// It is presentation only and never touches the graph model.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePreview {
    pub curve: [Pos2; 4],
    pub arrow: Option<[Pos2; 4]>,
}

impl EdgePreview {
    /// Builds the curve from `from` to `to`, and an arrowhead at `to` oriented along
    /// the drag when `directed`.
    pub fn new(from: Pos2, to: Pos2, directed: bool) -> Self {
        let drag = to - from;
        let angle = drag.y.atan2(drag.x);
        let length = drag.length();

        let curve = CURVE.map(|(x, y)| from + rotate_vector(Vec2::new(x * length, y), angle));
        let arrow = directed
            .then(|| ARROW.map(|(x, y)| to + rotate_vector(Vec2::new(x, y), angle)));

        Self { curve, arrow }
    }

    pub fn shapes(&self, stroke: Stroke) -> Vec<Shape> {
        let mut res: Vec<Shape> = vec![CubicBezierShape::from_points_stroke(
            self.curve,
            false,
            Color32::default(),
            stroke,
        )
        .into()];

        // the notched outline is concave, so it is filled as two triangles
        if let Some([tip, left, notch, right]) = self.arrow {
            res.push(Shape::convex_polygon(
                vec![tip, left, notch],
                stroke.color,
                Stroke::default(),
            ));
            res.push(Shape::convex_polygon(
                vec![tip, notch, right],
                stroke.color,
                Stroke::default(),
            ));
        }

        res
    }
}

/// rotates vector by angle
fn rotate_vector(vec: Vec2, angle: f32) -> Vec2 {
    let cos = angle.cos();
    let sin = angle.sin();
    Vec2::new(cos * vec.x - sin * vec.y, sin * vec.x + cos * vec.y)
}
