//! Progressive withholding tax.

use rust_decimal::Decimal;

use crate::config::WithholdingSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::GrossWageResult;

/// Computes withholding tax on a taxable income.
///
/// Selects the bracket with the highest lower bound at or below the income
/// and returns `base_tax + (income - lower_bound) × marginal_rate`.
///
/// # Errors
///
/// Returns `InvalidAmount` for negative income.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding_tax;
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let schedule = loader
///     .withholding_schedule_for(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
///     .unwrap();
///
/// assert_eq!(calculate_withholding_tax(Decimal::from(20833), schedule).unwrap(), Decimal::ZERO);
/// assert_eq!(calculate_withholding_tax(Decimal::from(66667), schedule).unwrap(), Decimal::from(10833));
/// assert_eq!(calculate_withholding_tax(Decimal::from(30833), schedule).unwrap(), Decimal::from(2000));
/// ```
pub fn calculate_withholding_tax(
    taxable_income: Decimal,
    schedule: &WithholdingSchedule,
) -> EngineResult<Decimal> {
    if taxable_income < Decimal::ZERO {
        return Err(EngineError::invalid_amount("taxable_income", taxable_income));
    }

    let bracket = schedule
        .brackets
        .iter()
        .rfind(|b| b.lower_bound <= taxable_income)
        .ok_or_else(|| EngineError::InvalidConfig {
            message: format!(
                "Withholding schedule {} has no bracket for {}",
                schedule.effective_date, taxable_income
            ),
        })?;

    Ok(bracket.base_tax + (taxable_income - bracket.lower_bound) * bracket.marginal_rate)
}

/// Computes withholding tax on a gross wage result.
///
/// The taxable base is `total_gross`, before any deduction.
///
/// # Errors
///
/// Returns `InvalidArgument` when no gross result is supplied, and otherwise
/// the errors of [`calculate_withholding_tax`].
pub fn withholding_tax_from_gross(
    gross: Option<&GrossWageResult>,
    schedule: &WithholdingSchedule,
) -> EngineResult<Decimal> {
    let gross = gross.ok_or_else(|| EngineError::InvalidArgument {
        message: "gross wage is required to compute withholding tax".to_string(),
    })?;
    calculate_withholding_tax(gross.total_gross, schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::*;
    use proptest::prelude::*;

    /// Bracket base taxes are published rounded to the peso.
    const ROUNDING_TOLERANCE: Decimal = Decimal::ONE;

    fn tax(income: &str) -> Decimal {
        calculate_withholding_tax(dec(income), &create_test_schedule()).unwrap()
    }

    #[test]
    fn test_income_below_first_taxable_bracket() {
        assert_eq!(tax("0"), Decimal::ZERO);
        assert_eq!(tax("4625"), Decimal::ZERO);
        assert_eq!(tax("20833"), Decimal::ZERO);
    }

    #[test]
    fn test_second_bracket() {
        assert_eq!(tax("20834"), dec("0.20"));
        assert_eq!(tax("33333"), dec("2500"));
    }

    #[test]
    fn test_boundary_at_66667() {
        assert_eq!(tax("66667"), dec("10833"));
        assert_eq!(tax("66668"), dec("10833.30"));
    }

    #[test]
    fn test_top_brackets() {
        assert_eq!(tax("166667"), dec("40833.33"));
        assert_eq!(tax("666667"), dec("200833.33"));
        assert_eq!(tax("766667"), dec("235833.33"));
    }

    #[test]
    fn test_negative_income_is_rejected() {
        match calculate_withholding_tax(dec("-0.01"), &create_test_schedule()) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "taxable_income"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_gross_is_invalid_argument() {
        assert!(matches!(
            withholding_tax_from_gross(None, &create_test_schedule()),
            Err(EngineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_tax_from_gross_uses_total_gross() {
        let gross = GrossWageResult {
            hourly_rate: dec("500"),
            regular_pay: dec("60000"),
            overtime_pay: dec("6667"),
            holiday_pay: Decimal::ZERO,
            night_differential_pay: Decimal::ZERO,
            total_gross: dec("66667"),
        };
        assert_eq!(
            withholding_tax_from_gross(Some(&gross), &create_test_schedule()).unwrap(),
            dec("10833")
        );
    }

    #[test]
    fn test_continuous_at_every_boundary() {
        let schedule = create_test_schedule();
        let cent = dec("0.01");
        for bracket in schedule.brackets.iter().skip(1) {
            let at = calculate_withholding_tax(bracket.lower_bound, &schedule).unwrap();
            let below = calculate_withholding_tax(bracket.lower_bound - cent, &schedule).unwrap();
            assert!(
                (at - below).abs() <= ROUNDING_TOLERANCE,
                "tax is discontinuous at {}: {} vs {}",
                bracket.lower_bound,
                below,
                at
            );
        }
    }

    proptest! {
        #[test]
        fn prop_tax_is_non_decreasing(a in 0i64..=100_000_000, b in 0i64..=100_000_000) {
            let schedule = create_test_schedule();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_tax = calculate_withholding_tax(Decimal::new(low, 2), &schedule).unwrap();
            let high_tax = calculate_withholding_tax(Decimal::new(high, 2), &schedule).unwrap();
            prop_assert!(low_tax <= high_tax + ROUNDING_TOLERANCE);
            prop_assert!(low_tax >= Decimal::ZERO);
        }
    }
}
