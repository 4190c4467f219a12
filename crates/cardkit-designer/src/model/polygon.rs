use serde::{Deserialize, Serialize};

use cardkit_core::Point;

/// An arbitrary closed polygon given as ordered local-space vertices.
/// Regular polygons and stars are just vertex generators over this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonObject {
    pub vertices: Vec<Point>,
}

impl PolygonObject {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// A regular polygon centered on the local origin.
    pub fn regular(sides: u32, radius: f64) -> Self {
        let sides = sides.max(3);
        let mut vertices = Vec::with_capacity(sides as usize);
        for i in 0..sides {
            let theta = 2.0 * std::f64::consts::PI * f64::from(i) / f64::from(sides)
                - std::f64::consts::FRAC_PI_2;
            vertices.push(Point::new(radius * theta.cos(), radius * theta.sin()));
        }
        Self { vertices }
    }

    /// A star centered on the local origin, alternating between the outer
    /// and inner radius.
    pub fn star(points: u32, outer_radius: f64, inner_radius: f64) -> Self {
        let points = points.max(3);
        let mut vertices = Vec::with_capacity(points as usize * 2);
        for i in 0..points * 2 {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let theta = std::f64::consts::PI * f64::from(i) / f64::from(points)
                - std::f64::consts::FRAC_PI_2;
            vertices.push(Point::new(radius * theta.cos(), radius * theta.sin()));
        }
        Self { vertices }
    }

    pub fn local_bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for v in &self.vertices {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }
        if self.vertices.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        (min_x, min_y, max_x, max_y)
    }
}
