use crate::TtmError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TtmError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TtmError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, TtmError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(TtmError::Negative { what, value: v });
    }
    Ok(v)
}

/// Largest value of a slice, `None` when empty.
pub fn max_value(values: &[Real]) -> Option<Real> {
    values.iter().copied().reduce(Real::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(ensure_non_negative(0.0, "load").unwrap(), 0.0);
        let err = ensure_non_negative(-1.0, "load").unwrap_err();
        assert_eq!(
            err,
            TtmError::Negative {
                what: "load",
                value: -1.0
            }
        );
    }

    #[test]
    fn max_value_of_empty_slice() {
        assert_eq!(max_value(&[]), None);
        assert_eq!(max_value(&[1.0, 3.0, 2.0]), Some(3.0));
    }
}
