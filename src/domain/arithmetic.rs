//! Checked decimal arithmetic
//!
//! `Decimal` operators panic on overflow. Money computed from user input goes
//! through these helpers instead, turning overflow into
//! [`MedRoiError::Computation`] naming the quantity being computed.

use crate::domain::errors::MedRoiError;
use crate::domain::result::Result;
use rust_decimal::Decimal;

pub fn checked_add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

pub fn checked_sub(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(what))
}

pub fn checked_mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

/// Division; a zero divisor is reported the same way as overflow
pub fn checked_div(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(what))
}

/// Sums `values`, failing on the first overflow
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>, what: &str) -> Result<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| checked_add(acc, v, what))
}

pub(crate) fn overflow(what: &str) -> MedRoiError {
    MedRoiError::Computation(format!("decimal overflow while computing {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_in_range_results() {
        assert_eq!(checked_add(dec!(1.5), dec!(2), "x").unwrap(), dec!(3.5));
        assert_eq!(checked_sub(dec!(1), dec!(3), "x").unwrap(), dec!(-2));
        assert_eq!(checked_mul(dec!(12), dec!(0.5), "x").unwrap(), dec!(6));
        assert_eq!(checked_div(dec!(1), dec!(4), "x").unwrap(), dec!(0.25));
        assert_eq!(checked_sum([dec!(1), dec!(2), dec!(3)], "x").unwrap(), dec!(6));
    }

    #[test]
    fn test_overflow_names_quantity() {
        let err = checked_add(Decimal::MAX, Decimal::ONE, "growth factor").unwrap_err();
        assert!(matches!(err, MedRoiError::Computation(ref m) if m.contains("growth factor")));

        assert!(checked_sub(Decimal::MIN, Decimal::ONE, "x").is_err());
        assert!(checked_mul(Decimal::MAX, dec!(2), "x").is_err());
        assert!(checked_div(Decimal::MAX, dec!(0.1), "x").is_err());
        assert!(checked_div(Decimal::ONE, Decimal::ZERO, "x").is_err());
        assert!(checked_sum([Decimal::MAX, Decimal::MAX], "x").is_err());
    }
}
