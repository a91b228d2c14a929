//! Axis range selection and value-to-pixel mapping.

/// A rounded axis range suitable for tick placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub interval: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Pick a tick interval from the 1/2/2.5/5/10 ladder and round the data range
/// outward to multiples of it.
///
/// A data bound sitting within 0.67·interval of its rounded value is pushed
/// out by one extra interval so the extreme rectangle never touches the box
/// edge. For depth axes the caller clamps a negative minimum to zero
/// afterwards.
pub fn nice_range(min_value: f64, max_value: f64) -> AxisRange {
    const INTERVAL_SHIFT: f64 = 0.67;

    let mut factor = 0.01_f64;
    let mut interval = factor;
    let delta = (max_value - min_value) / 5.0;

    while delta > factor {
        interval = if delta <= factor * 2.0 {
            factor * 2.0
        } else if delta <= factor * 2.5 {
            if factor < 10.0 { factor * 2.0 } else { factor * 2.5 }
        } else if delta <= factor * 5.0 {
            factor * 5.0
        } else {
            factor * 10.0
        };
        factor *= 10.0;
    }

    // Maximum
    let steps = (max_value / interval).trunc();
    let mut value = steps * interval;
    if max_value > value {
        value = (steps + 1.0) * interval;
    }
    let max = if (max_value - value).abs() <= INTERVAL_SHIFT * interval {
        value + interval
    } else {
        value
    };

    // Minimum
    let steps = (min_value / interval).trunc();
    let mut value = (steps * interval).trunc();
    if min_value < value {
        value = (steps - 1.0) * interval;
    }
    let min = if (min_value - value).abs() <= INTERVAL_SHIFT * interval {
        value - interval
    } else {
        value
    };

    AxisRange { min, max, interval }
}

/// Linear map from a data domain onto a pixel span.
///
/// `map(domain_min) == px_min` and `map(domain_max) == px_max`; values in
/// between interpolate linearly. Used identically for the vertical (depth)
/// and horizontal (diameter) directions.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_span: f64,
    px_min: f64,
    px_span: f64,
}

impl LinearScale {
    /// Build a scale, refusing degenerate domains.
    ///
    /// Returns `None` when the domain has zero or negative width (or is not
    /// finite) so callers never divide by zero.
    pub fn new(domain: (f64, f64), px: (f64, f64)) -> Option<Self> {
        let domain_span = domain.1 - domain.0;
        if !domain_span.is_finite() || domain_span <= 0.0 {
            return None;
        }
        Some(Self {
            domain_min: domain.0,
            domain_span,
            px_min: px.0,
            px_span: px.1 - px.0,
        })
    }

    pub fn map(&self, value: f64) -> f64 {
        self.px_min + self.px_span * (value - self.domain_min) / self.domain_span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_range_contains_data() {
        let cases = [
            (0.0, 50.0),
            (0.0, 18.0),
            (0.0, 1.0),
            (0.0, 7.3),
            (12.0, 957.0),
            (-5.0, 42.0),
            (0.3, 0.9),
            (0.0, 12000.0),
        ];
        for (lo, hi) in cases {
            let r = nice_range(lo, hi);
            assert!(r.interval > 0.0, "interval for ({lo}, {hi})");
            assert!(r.min <= lo, "min {} > {} for ({lo}, {hi})", r.min, lo);
            assert!(r.max >= hi, "max {} < {} for ({lo}, {hi})", r.max, hi);
        }
    }

    #[test]
    fn nice_range_depth_example() {
        // A 0..50 ft well: 10 ft ticks, top bound pushed out to 60 because 50
        // lands exactly on a tick.
        let r = nice_range(0.0, 50.0);
        assert_eq!(r.interval, 10.0);
        assert_eq!(r.max, 60.0);
        assert_eq!(r.min, -10.0);
    }

    #[test]
    fn scale_maps_endpoints_and_is_monotonic() {
        let s = LinearScale::new((0.0, 60.0), (50.0, 600.0)).unwrap();
        assert_eq!(s.map(0.0), 50.0);
        assert_eq!(s.map(60.0), 600.0);
        let mut prev = s.map(0.0);
        for i in 1..=60 {
            let px = s.map(i as f64);
            assert!(px > prev);
            prev = px;
        }
    }

    #[test]
    fn degenerate_domain_refused() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 100.0)).is_none());
        assert!(LinearScale::new((5.0, 1.0), (0.0, 100.0)).is_none());
        assert!(LinearScale::new((0.0, f64::NAN), (0.0, 100.0)).is_none());
    }
}
