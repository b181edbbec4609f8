use crate::orientation::Orientation;

pub const DEFAULT_PORTRAIT_END_POINT: f64 = 0.7;
pub const DEFAULT_LANDSCAPE_END_POINT: f64 = 0.5;
/// Share of the screen height kept free above the drag range.
pub const TOP_MARGIN_FRACTION: f64 = 0.1;

/// Caller-configured upper end points, as fractions of the screen height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EndPoints {
    pub portrait: Option<f64>,
    pub landscape: Option<f64>,
}

impl EndPoints {
    pub fn new(portrait: Option<f64>, landscape: Option<f64>) -> Self {
        Self {
            portrait,
            landscape,
        }
    }

    pub fn fraction(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Portrait => resolve(self.portrait, DEFAULT_PORTRAIT_END_POINT),
            Orientation::Landscape => resolve(self.landscape, DEFAULT_LANDSCAPE_END_POINT),
        }
    }
}

/// Falls back to `default` when the fraction is unset, above 1, or not a positive number.
fn resolve(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0 && *v <= 1.0)
        .unwrap_or(default)
}

/// Vertical drag range. `input` maps onto `output` linearly and values outside
/// `input` are clamped, never extrapolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRange {
    pub input: [f64; 2],
    pub output: [f64; 2],
}

impl ClampRange {
    pub fn compute(
        screen_height: f64,
        top_inset: f64,
        orientation: Orientation,
        end_points: &EndPoints,
    ) -> Self {
        let lower = screen_height * TOP_MARGIN_FRACTION + top_inset;
        let upper = (screen_height * end_points.fraction(orientation)).max(lower);
        Self::identity(lower, upper)
    }

    pub fn identity(lower: f64, upper: f64) -> Self {
        Self {
            input: [lower, upper],
            output: [lower, upper],
        }
    }

    pub fn lower(&self) -> f64 {
        self.input[0]
    }

    pub fn upper(&self) -> f64 {
        self.input[1]
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.input[0]..=self.input[1]).contains(&value)
    }

    pub fn interpolate(&self, value: f64) -> f64 {
        let [in_lo, in_hi] = self.input;
        let [out_lo, out_hi] = self.output;

        if value <= in_lo {
            return out_lo;
        }
        if value >= in_hi {
            return out_hi;
        }
        out_lo + (value - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f64 = 1000.0;

    fn upper(orientation: Orientation, end_points: EndPoints) -> f64 {
        ClampRange::compute(HEIGHT, 0.0, orientation, &end_points).upper()
    }

    #[test]
    fn lower_bound_keeps_top_margin_and_inset() {
        let range =
            ClampRange::compute(HEIGHT, 16.0, Orientation::Portrait, &EndPoints::default());
        assert_eq!(range.lower(), 116.0);
        assert_eq!(range.input, range.output);
    }

    #[test]
    fn missing_or_oversized_end_points_fall_back() {
        for portrait in [None, Some(1.5), Some(100.0), Some(f64::NAN), Some(0.0), Some(-0.3)] {
            let end_points = EndPoints::new(portrait, None);
            assert_eq!(upper(Orientation::Portrait, end_points), 700.0);
        }
        for landscape in [None, Some(1.01), Some(f64::INFINITY)] {
            let end_points = EndPoints::new(None, landscape);
            assert_eq!(upper(Orientation::Landscape, end_points), 500.0);
        }
    }

    #[test]
    fn valid_end_points_are_used_exactly() {
        for v in [0.2, 0.45, 0.6, 0.999, 1.0] {
            let end_points = EndPoints::new(Some(v), Some(v));
            assert_eq!(upper(Orientation::Portrait, end_points), HEIGHT * v);
            assert_eq!(upper(Orientation::Landscape, end_points), HEIGHT * v);
        }
    }

    #[test]
    fn end_point_applies_to_its_own_orientation_only() {
        let end_points = EndPoints::new(Some(0.6), None);
        assert_eq!(upper(Orientation::Portrait, end_points), 600.0);
        assert_eq!(upper(Orientation::Landscape, end_points), 500.0);
    }

    #[test]
    fn upper_never_drops_below_lower() {
        let range = ClampRange::compute(
            HEIGHT,
            40.0,
            Orientation::Portrait,
            &EndPoints::new(Some(0.05), None),
        );
        assert_eq!(range.lower(), 140.0);
        assert_eq!(range.upper(), 140.0);
        assert_eq!(range.interpolate(900.0), 140.0);
    }

    #[test]
    fn interpolate_clamps_identity_range() {
        let range = ClampRange::identity(116.0, 600.0);
        assert_eq!(range.interpolate(0.0), 116.0);
        assert_eq!(range.interpolate(300.0), 300.0);
        assert_eq!(range.interpolate(900.0), 600.0);
    }

    #[test]
    fn interpolate_is_monotonic_and_bounded() {
        let range = ClampRange::identity(66.0, 250.0);
        let mut previous = f64::MIN;
        for raw in (-500..=1500).map(|v| v as f64) {
            let rendered = range.interpolate(raw);
            assert!(rendered >= previous);
            assert!(range.contains(rendered));
            assert_eq!(range.interpolate(raw), rendered);
            previous = rendered;
        }
    }
}
