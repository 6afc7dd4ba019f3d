//! Constants shared by every proportion and harmony overlay.

/// The golden ratio, (1 + √5) / 2.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Fibonacci labels for successive square subdivisions.
pub const FIBONACCI: [u32; 12] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];

/// Logomark size used when no component is classified as the icon.
pub const FALLBACK_LOGOMARK_SIZE: f64 = 50.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_identity() {
        assert!((PHI - (1.0 + 5f64.sqrt()) / 2.0).abs() < 1e-15);
        assert!((PHI * PHI - (PHI + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fibonacci_recurrence() {
        for w in FIBONACCI.windows(3) {
            assert_eq!(w[0] + w[1], w[2]);
        }
    }
}
