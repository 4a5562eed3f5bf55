//! Severity classification of relative errors.

use checklast_api::Thresholds;
use checklast_spi::Severity;

/// Severity band of a relative error; `None` when the error is absent.
///
/// The band is computed on `|relative_error|`: below `orange` is normal,
/// from `orange` up to (excluding) `red` is a warning, `red` and above is
/// critical.
pub fn classify(relative_error: Option<f64>, thresholds: &Thresholds) -> Option<Severity> {
    let magnitude = relative_error?.abs();
    if magnitude.is_nan() {
        return None;
    }
    let severity = if magnitude >= thresholds.red {
        Severity::Critical
    } else if magnitude >= thresholds.orange {
        Severity::Warning
    } else {
        Severity::Normal
    };
    Some(severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds::new(0.04, 0.06).unwrap()
    }

    #[test]
    fn test_bands() {
        let t = thresholds();
        assert_eq!(classify(Some(0.01), &t), Some(Severity::Normal));
        assert_eq!(classify(Some(0.05), &t), Some(Severity::Warning));
        assert_eq!(classify(Some(0.2), &t), Some(Severity::Critical));
    }

    #[test]
    fn test_boundaries_belong_to_upper_band() {
        let t = thresholds();
        assert_eq!(classify(Some(0.04), &t), Some(Severity::Warning));
        assert_eq!(classify(Some(0.06), &t), Some(Severity::Critical));
    }

    #[test]
    fn test_uses_magnitude() {
        let t = thresholds();
        assert_eq!(classify(Some(-0.05), &t), Some(Severity::Warning));
        assert_eq!(classify(Some(-1.0), &t), Some(Severity::Critical));
    }

    #[test]
    fn test_absent_error() {
        assert_eq!(classify(None, &thresholds()), None);
        assert_eq!(classify(Some(f64::NAN), &thresholds()), None);
    }

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(classify(Some(3.99), &t), Some(Severity::Normal));
        assert_eq!(classify(Some(4.0), &t), Some(Severity::Warning));
        assert_eq!(classify(Some(5.0), &t), Some(Severity::Critical));
    }
}
