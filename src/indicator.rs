//! Screen-space projection of the destination indicator.
//!
//! Maps a device heading and a target bearing onto a point on the heading
//! dial's circumference, plus the rotation that keeps the indicator glyph
//! tangent to the dial. Pure trigonometry over display coordinates; no
//! drawing API involved.

/// Center and radius of the heading dial, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

/// Half extents of the indicator glyph. The placement compensates for
/// these so the glyph's anchor point, not its top-left corner, lands on
/// the dial arc.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorSize {
    pub half_width: f32,
    pub half_height: f32,
}

impl IndicatorSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }
}

/// Where to place the indicator and how far to rotate its glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPlacement {
    pub x: f32,
    pub y: f32,
    /// Glyph rotation in degrees, clockwise positive.
    pub rotation: f32,
}

/// Project the indicator for a device heading and target bearing.
///
/// The effective dial angle is `-heading - 90 + bearing`: with the device
/// pointed north, a bearing of 0 places the indicator at the top of the
/// dial, and the whole dial counter-rotates with the heading. The glyph
/// rotation is the angle plus 90 degrees so its point faces outward,
/// tangent to the circle.
pub fn project(
    heading: f32,
    bearing: f32,
    dial: DialGeometry,
    size: IndicatorSize,
) -> IndicatorPlacement {
    let angle = -heading - 90.0 + bearing;
    let radians = (angle as f64).to_radians();

    IndicatorPlacement {
        x: dial.center_x - size.half_width + dial.radius * radians.cos() as f32,
        y: dial.center_y - size.half_height + dial.radius * radians.sin() as f32,
        rotation: angle + 90.0,
    }
}
