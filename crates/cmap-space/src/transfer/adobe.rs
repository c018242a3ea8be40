//! Adobe RGB (1998) transfer function: a pure power law of 563/256 (≈2.2).

/// Adobe RGB gamma.
pub const GAMMA: f64 = 563.0 / 256.0;

/// Decodes Adobe RGB encoded values to linear light.
#[inline]
pub fn eotf(v: f64) -> f64 {
    v.abs().powf(GAMMA).copysign(v)
}

/// Encodes linear light to Adobe RGB.
#[inline]
pub fn oetf(l: f64) -> f64 {
    l.abs().powf(1.0 / GAMMA).copysign(l)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for i in -20..=20 {
            let v = i as f64 / 20.0;
            assert!((oetf(eotf(v)) - v).abs() < 1e-12, "v={v}");
        }
    }

    #[test]
    fn test_midpoint() {
        assert!((eotf(0.5) - 0.2176).abs() < 1e-3);
    }
}
