//! Points and 2-D affine transforms.
//!
//! Surface coordinates: `(0, 0)` is top-left, y grows downward, so a
//! positive rotation angle turns clockwise on screen.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2-D point or vector in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (*self - *other).length()
    }

    /// Vector length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: &Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Angle of this vector in radians, `atan2(y, x)`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Arithmetic mean of a set of points; `None` when empty.
    pub fn centroid<I>(points: I) -> Option<Point2D>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let (sum, count) = points
            .into_iter()
            .fold((Point2D::ZERO, 0usize), |(sum, n), p| (sum + p, n + 1));
        if count == 0 {
            return None;
        }
        Some(sum * (1.0 / count as f64))
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2D {
    fn add_assign(&mut self, rhs: Point2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

/// Row-major 2x3 affine matrix:
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// The `post_*` builders left-multiply, so operations apply in call order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine2D {
    pub a: f64,
    pub b: f64,
    pub tx: f64,
    pub c: f64,
    pub d: f64,
    pub ty: f64,
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        a: 1.0,
        b: 0.0,
        tx: 0.0,
        c: 0.0,
        d: 1.0,
        ty: 0.0,
    };

    /// `self` followed by `next`.
    pub fn then(&self, next: &Affine2D) -> Affine2D {
        Affine2D {
            a: next.a * self.a + next.b * self.c,
            b: next.a * self.b + next.b * self.d,
            tx: next.a * self.tx + next.b * self.ty + next.tx,
            c: next.c * self.a + next.d * self.c,
            d: next.c * self.b + next.d * self.d,
            ty: next.c * self.tx + next.d * self.ty + next.ty,
        }
    }

    pub fn post_scale(&self, sx: f64, sy: f64) -> Affine2D {
        self.then(&Affine2D {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        })
    }

    /// Rotate by `degrees` around `pivot`.
    pub fn post_rotate(&self, degrees: f64, pivot: Point2D) -> Affine2D {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rotation = Affine2D {
            a: cos,
            b: -sin,
            tx: pivot.x - cos * pivot.x + sin * pivot.y,
            c: sin,
            d: cos,
            ty: pivot.y - sin * pivot.x - cos * pivot.y,
        };
        self.then(&rotation)
    }

    pub fn post_translate(&self, dx: f64, dy: f64) -> Affine2D {
        self.then(&Affine2D {
            tx: dx,
            ty: dy,
            ..Self::IDENTITY
        })
    }

    /// Map a point through this transform.
    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform; `None` when singular.
    pub fn invert(&self) -> Option<Affine2D> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine2D {
            a: self.d * inv,
            b: -self.b * inv,
            tx: (self.b * self.ty - self.d * self.tx) * inv,
            c: -self.c * inv,
            d: self.a * inv,
            ty: (self.c * self.tx - self.a * self.ty) * inv,
        })
    }
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point2D, b: Point2D) {
        assert!(
            a.distance_to(&b) < 1e-9,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn test_point2d_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid() {
        let c = Point2D::centroid([
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(20.0, 30.0),
        ])
        .unwrap();
        assert_close(c, Point2D::new(10.0, 10.0));
        assert!(Point2D::centroid(std::iter::empty()).is_none());
    }

    #[test]
    fn test_rotate_about_pivot() {
        let m = Affine2D::IDENTITY.post_rotate(90.0, Point2D::new(1.0, 1.0));
        // y-down: (2, 1) turns clockwise on screen to (1, 2)
        assert_close(m.apply(Point2D::new(2.0, 1.0)), Point2D::new(1.0, 2.0));
        assert_close(m.apply(Point2D::new(1.0, 1.0)), Point2D::new(1.0, 1.0));
    }

    #[test]
    fn test_post_operations_apply_in_order() {
        let m = Affine2D::IDENTITY
            .post_scale(2.0, 2.0)
            .post_translate(5.0, -1.0);
        assert_close(m.apply(Point2D::new(1.0, 1.0)), Point2D::new(7.0, 1.0));
    }

    #[test]
    fn test_invert() {
        let m = Affine2D::IDENTITY
            .post_scale(0.4, 0.4)
            .post_rotate(30.0, Point2D::new(50.0, 50.0))
            .post_translate(12.0, 7.0);
        let inv = m.invert().unwrap();
        let p = Point2D::new(13.0, -4.0);
        assert_close(inv.apply(m.apply(p)), p);

        let singular = Affine2D::IDENTITY.post_scale(0.0, 1.0);
        assert!(singular.invert().is_none());
    }
}
