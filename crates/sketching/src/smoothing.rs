//! Curve smoothing
//!
//! Each sample `b` with neighbors `a` and `c` gets two Bezier control points
//! on the line through `b` parallel to the chord `c - a`. The distance of each
//! control point from `b` is the projection of the adjacent segment onto the
//! chord, scaled by the smoothing coefficient K. Segments that turn away from
//! the chord project shorter, which damps overshoot on sharp corners.
//!
//! A stroke with samples `s0..sn` renders as one cubic segment per pair
//! `(s[i-1], s[i])`, using `after` of `s[i-1]` and `before` of `s[i]`.

use sketchpad_config::StrokeStyle;

use crate::types::Stroke;
use crate::vector::Vector2;

/// Control points bracketing a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoints {
    /// Second control point of the segment ending at the sample
    pub before: Vector2,
    /// First control point of the segment starting at the sample
    pub after: Vector2,
}

impl ControlPoints {
    /// Both control points on the sample itself
    pub fn degenerate(b: Vector2) -> Self {
        Self {
            before: b,
            after: b,
        }
    }
}

/// Compute the control points for `b`.
///
/// Missing neighbors (stroke endpoints) and coincident neighbors (`a == c`)
/// collapse both control points onto `b`.
pub fn control_points(a: Option<Vector2>, b: Vector2, c: Option<Vector2>, k: f64) -> ControlPoints {
    let (Some(a), Some(c)) = (a, c) else {
        return ControlPoints::degenerate(b);
    };

    let ac = c.sub(a);
    let chord = ac.length();
    if chord == 0.0 {
        return ControlPoints::degenerate(b);
    }

    let bc = c.sub(b);
    let ab = b.sub(a);

    let ka = k * ab.dot(ac) / chord;
    let kb = k * bc.dot(ac) / chord;
    let direction = ac.normalized();

    ControlPoints {
        before: direction.scale(-ka).add(b),
        after: direction.scale(kb).add(b),
    }
}

/// Control points for the sample at `index` using its stroke neighbors
pub fn stroke_control_points(stroke: &Stroke, index: usize, k: f64) -> Option<ControlPoints> {
    let b = stroke.get(index)?.point;
    let a = stroke.previous(index).map(|s| s.point);
    let c = stroke.next(index).map(|s| s.point);
    Some(control_points(a, b, c, k))
}

/// One cubic Bezier segment between consecutive samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: Vector2,
    pub ctrl1: Vector2,
    pub ctrl2: Vector2,
    pub end: Vector2,
}

impl CubicSegment {
    /// Point at parameter `t` in [0, 1]
    pub fn eval(&self, t: f64) -> Vector2 {
        let mt = 1.0 - t;
        self.start
            .scale(mt * mt * mt)
            .add(self.ctrl1.scale(3.0 * mt * mt * t))
            .add(self.ctrl2.scale(3.0 * mt * t * t))
            .add(self.end.scale(t * t * t))
    }

    /// Length of the control polygon, an upper bound on the arc length
    pub fn control_polygon_length(&self) -> f64 {
        self.start.distance(self.ctrl1) + self.ctrl1.distance(self.ctrl2) + self.ctrl2.distance(self.end)
    }
}

/// Smoothed segments of a stroke, one per consecutive sample pair
pub fn stroke_segments(stroke: &Stroke, k: f64) -> impl Iterator<Item = CubicSegment> + '_ {
    (1..stroke.len()).filter_map(move |i| {
        let start = stroke.get(i - 1)?.point;
        let end = stroke.get(i)?.point;
        let from = stroke_control_points(stroke, i - 1, k)?;
        let to = stroke_control_points(stroke, i, k)?;
        Some(CubicSegment {
            start,
            ctrl1: from.after,
            ctrl2: to.before,
            end,
        })
    })
}

/// Path drawing primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vector2),
    LineTo(Vector2),
    CubicTo {
        ctrl1: Vector2,
        ctrl2: Vector2,
        end: Vector2,
    },
}

/// Path for a whole stroke in the requested style. Empty strokes give an
/// empty path.
pub fn stroke_path(stroke: &Stroke, style: StrokeStyle, k: f64) -> Vec<PathCommand> {
    let Some(first) = stroke.get(0) else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(stroke.len());
    path.push(PathCommand::MoveTo(first.point));

    match style {
        StrokeStyle::Bezier => {
            path.extend(stroke_segments(stroke, k).map(|seg| PathCommand::CubicTo {
                ctrl1: seg.ctrl1,
                ctrl2: seg.ctrl2,
                end: seg.end,
            }));
        }
        StrokeStyle::Linear => {
            path.extend(stroke.iter().skip(1).map(|s| PathCommand::LineTo(s.point)));
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    const K: f64 = 0.35;

    fn stroke_of(points: &[(f64, f64)]) -> Stroke {
        let mut stroke = Stroke::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            stroke
                .push(Sample::new(Vector2::new(x, y), 0.5, Vector2::ZERO, i as f64))
                .unwrap();
        }
        stroke
    }

    /// Cross product of (p - b) with the chord direction
    fn off_tangent(p: Vector2, b: Vector2, chord: Vector2) -> f64 {
        let d = p.sub(b);
        d.x * chord.y - d.y * chord.x
    }

    #[test]
    fn test_tangent_alignment() {
        let cases = [
            (Vector2::new(0.0, 0.0), Vector2::new(3.0, 4.0), Vector2::new(10.0, 1.0)),
            (Vector2::new(-5.0, 2.0), Vector2::new(0.0, 9.0), Vector2::new(1.0, -7.0)),
            (Vector2::new(1.0, 1.0), Vector2::new(50.0, 50.0), Vector2::new(2.0, 3.0)),
        ];

        for (a, b, c) in cases {
            let cps = control_points(Some(a), b, Some(c), K);
            let chord = c.sub(a);
            assert!(off_tangent(cps.before, b, chord).abs() < 1e-9);
            assert!(off_tangent(cps.after, b, chord).abs() < 1e-9);
        }
    }

    #[test]
    fn test_magnitudes_follow_projection() {
        // Right angle at b: ab = (10, 0), bc = (0, 10), ac = (10, 10)
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(10.0, 0.0);
        let c = Vector2::new(10.0, 10.0);
        let cps = control_points(Some(a), b, Some(c), K);

        let expected = K * 100.0 / 200.0_f64.sqrt();
        assert!((cps.before.distance(b) - expected).abs() < 1e-9);
        assert!((cps.after.distance(b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_cases() {
        let b = Vector2::new(4.0, 2.0);
        let a = Vector2::new(1.0, 1.0);

        assert_eq!(control_points(None, b, Some(a), K), ControlPoints::degenerate(b));
        assert_eq!(control_points(Some(a), b, None, K), ControlPoints::degenerate(b));
        assert_eq!(control_points(None, b, None, K), ControlPoints::degenerate(b));
        // a == c: zero chord
        assert_eq!(control_points(Some(a), b, Some(a), K), ControlPoints::degenerate(b));
    }

    #[test]
    fn test_collinear_stroke_stays_on_axis() {
        let stroke = stroke_of(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let cps = stroke_control_points(&stroke, 1, K).unwrap();

        assert_eq!(cps.before.y, 0.0);
        assert_eq!(cps.after.y, 0.0);
        assert!((cps.before.x - 6.5).abs() < 1e-12);
        assert!((cps.after.x - 13.5).abs() < 1e-12);

        for seg in stroke_segments(&stroke, K) {
            for step in 0..=10 {
                assert!(seg.eval(step as f64 / 10.0).y.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_segment_assembly() {
        let stroke = stroke_of(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0), (30.0, 5.0)]);
        let segments: Vec<_> = stroke_segments(&stroke, K).collect();
        assert_eq!(segments.len(), 3);

        for (i, seg) in segments.iter().enumerate() {
            let from = stroke_control_points(&stroke, i, K).unwrap();
            let to = stroke_control_points(&stroke, i + 1, K).unwrap();
            assert_eq!(seg.start, stroke.samples()[i].point);
            assert_eq!(seg.end, stroke.samples()[i + 1].point);
            assert_eq!(seg.ctrl1, from.after);
            assert_eq!(seg.ctrl2, to.before);
        }

        // Endpoints produce straight end segments
        assert_eq!(segments[0].ctrl1, segments[0].start);
        assert_eq!(segments[2].ctrl2, segments[2].end);
    }

    #[test]
    fn test_segment_eval_endpoints() {
        let seg = CubicSegment {
            start: Vector2::new(0.0, 0.0),
            ctrl1: Vector2::new(1.0, 3.0),
            ctrl2: Vector2::new(4.0, 3.0),
            end: Vector2::new(5.0, 0.0),
        };
        assert_eq!(seg.eval(0.0), seg.start);
        assert_eq!(seg.eval(1.0), seg.end);
        assert!(seg.control_polygon_length() >= seg.start.distance(seg.end));
    }

    #[test]
    fn test_stroke_path_styles() {
        let stroke = stroke_of(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)]);

        let bezier = stroke_path(&stroke, StrokeStyle::Bezier, K);
        assert_eq!(bezier.len(), 3);
        assert_eq!(bezier[0], PathCommand::MoveTo(Vector2::new(0.0, 0.0)));
        assert!(matches!(bezier[2], PathCommand::CubicTo { end, .. } if end == Vector2::new(20.0, 0.0)));

        let linear = stroke_path(&stroke, StrokeStyle::Linear, K);
        assert_eq!(
            linear,
            vec![
                PathCommand::MoveTo(Vector2::new(0.0, 0.0)),
                PathCommand::LineTo(Vector2::new(10.0, 5.0)),
                PathCommand::LineTo(Vector2::new(20.0, 0.0)),
            ]
        );

        assert!(stroke_path(&Stroke::new(), StrokeStyle::Bezier, K).is_empty());
    }

    #[test]
    fn test_single_sample_path() {
        let stroke = stroke_of(&[(3.0, 3.0)]);
        assert_eq!(
            stroke_path(&stroke, StrokeStyle::Bezier, K),
            vec![PathCommand::MoveTo(Vector2::new(3.0, 3.0))]
        );
    }
}
