//! Statutory contribution and late-penalty deductions.
//!
//! Each contribution is a table lookup or a clamped rate configured in
//! contributions.yaml:
//!
//! - SSS: the fixed contribution of the highest bracket whose lower bound is
//!   at or below gross pay
//! - PhilHealth: `clamp(gross × rate, floor, ceiling) × employee_share`
//! - Pag-IBIG: `min(gross × tier rate, cap)`
//!
//! The late penalty charges late minutes at the hourly rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ContributionConfig, PagIbigRule, PhilHealthRule, SssTable};
use crate::error::{EngineError, EngineResult};

use super::gross_wage::{checked_product, checked_sum};

/// The four deductions taken from gross pay before tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Social-insurance contribution.
    pub sss: Decimal,
    /// Health-insurance contribution.
    pub philhealth: Decimal,
    /// Housing-fund contribution.
    pub pagibig: Decimal,
    /// Late-arrival penalty.
    pub late: Decimal,
    /// Sum of the four.
    pub total: Decimal,
}

fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_amount(field, value));
    }
    Ok(())
}

/// Looks up the SSS contribution for a gross amount.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::sss_contribution;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let sss = &loader.config().contributions().sss;
///
/// assert_eq!(sss_contribution(Decimal::from(3000), sss).unwrap(), Decimal::new(13500, 2));
/// assert_eq!(sss_contribution(Decimal::from(4625), sss).unwrap(), Decimal::new(20250, 2));
/// ```
pub fn sss_contribution(gross: Decimal, table: &SssTable) -> EngineResult<Decimal> {
    ensure_non_negative("gross", gross)?;
    Ok(table
        .brackets
        .iter()
        .rfind(|b| b.lower_bound <= gross)
        .map(|b| b.contribution)
        .unwrap_or(Decimal::ZERO))
}

/// Computes the employee's PhilHealth premium share.
pub fn philhealth_contribution(gross: Decimal, rule: &PhilHealthRule) -> EngineResult<Decimal> {
    ensure_non_negative("gross", gross)?;
    let premium = (gross * rule.rate).max(rule.floor).min(rule.ceiling);
    Ok(premium * rule.employee_share)
}

/// Computes the Pag-IBIG contribution using the tier covering `gross`.
pub fn pagibig_contribution(gross: Decimal, rule: &PagIbigRule) -> EngineResult<Decimal> {
    ensure_non_negative("gross", gross)?;
    let rate = rule
        .tiers
        .iter()
        .rfind(|t| t.lower_bound <= gross)
        .map(|t| t.rate)
        .unwrap_or(Decimal::ZERO);
    Ok((gross * rate).min(rule.cap))
}

/// Charges late minutes at the hourly rate.
pub fn late_deduction(late_minutes: Decimal, hourly_rate: Decimal) -> EngineResult<Decimal> {
    ensure_non_negative("late_minutes", late_minutes)?;
    ensure_non_negative("hourly_rate", hourly_rate)?;
    let charged = checked_product("late_deduction", &[late_minutes, hourly_rate])?;
    Ok(charged / Decimal::from(60))
}

/// Computes all deductions for one period.
///
/// # Errors
///
/// Returns `InvalidAmount` for a negative gross, late-minute total or rate.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let deductions = calculate_deductions(
///     Decimal::from(4625),
///     Decimal::ZERO,
///     Decimal::from(100),
///     loader.config().contributions(),
/// )
/// .unwrap();
///
/// assert_eq!(deductions.sss, Decimal::new(20250, 2));
/// assert_eq!(deductions.philhealth, Decimal::from(150));
/// assert_eq!(deductions.pagibig, Decimal::new(9250, 2));
/// assert_eq!(deductions.total, Decimal::new(44500, 2));
/// ```
pub fn calculate_deductions(
    total_gross: Decimal,
    total_late_minutes: Decimal,
    hourly_rate: Decimal,
    contributions: &ContributionConfig,
) -> EngineResult<DeductionBreakdown> {
    let sss = sss_contribution(total_gross, &contributions.sss)?;
    let philhealth = philhealth_contribution(total_gross, &contributions.philhealth)?;
    let pagibig = pagibig_contribution(total_gross, &contributions.pagibig)?;
    let late = late_deduction(total_late_minutes, hourly_rate)?;

    Ok(DeductionBreakdown {
        sss,
        philhealth,
        pagibig,
        late,
        total: checked_sum("total_deductions", [sss, philhealth, pagibig, late])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::*;

    #[test]
    fn test_sss_lowest_bracket() {
        let table = create_test_contributions().sss;
        assert_eq!(sss_contribution(Decimal::ZERO, &table).unwrap(), dec("135.00"));
        assert_eq!(sss_contribution(dec("3249.99"), &table).unwrap(), dec("135.00"));
    }

    #[test]
    fn test_sss_bracket_boundaries() {
        let table = create_test_contributions().sss;
        assert_eq!(sss_contribution(dec("3250"), &table).unwrap(), dec("157.50"));
        assert_eq!(sss_contribution(dec("3749.99"), &table).unwrap(), dec("157.50"));
        assert_eq!(sss_contribution(dec("3750"), &table).unwrap(), dec("180.00"));
    }

    #[test]
    fn test_sss_top_bracket() {
        let table = create_test_contributions().sss;
        assert_eq!(sss_contribution(dec("24750"), &table).unwrap(), dec("1125.00"));
        assert_eq!(sss_contribution(dec("90000"), &table).unwrap(), dec("1125.00"));
    }

    #[test]
    fn test_philhealth_floor_and_ceiling() {
        let rule = create_test_contributions().philhealth;
        assert_eq!(philhealth_contribution(dec("4625"), &rule).unwrap(), dec("150"));
        assert_eq!(philhealth_contribution(dec("20000"), &rule).unwrap(), dec("300"));
        assert_eq!(philhealth_contribution(dec("100000"), &rule).unwrap(), dec("900"));
    }

    #[test]
    fn test_pagibig_tiers_and_cap() {
        let rule = create_test_contributions().pagibig;
        assert_eq!(pagibig_contribution(dec("1000"), &rule).unwrap(), dec("10"));
        assert_eq!(pagibig_contribution(dec("1500"), &rule).unwrap(), dec("15"));
        assert_eq!(pagibig_contribution(dec("4625"), &rule).unwrap(), dec("92.50"));
        assert_eq!(pagibig_contribution(dec("10000"), &rule).unwrap(), dec("100.00"));
    }

    #[test]
    fn test_late_deduction() {
        assert_eq!(late_deduction(dec("30"), dec("100")).unwrap(), dec("50"));
        assert_eq!(late_deduction(Decimal::ZERO, dec("100")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_late_deduction_overflow_is_rejected() {
        match late_deduction(dec("600"), Decimal::MAX) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "late_deduction"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let deductions =
            calculate_deductions(dec("4625"), dec("15"), dec("100"), &create_test_contributions())
                .unwrap();

        assert_eq!(deductions.late, dec("25"));
        assert_eq!(
            deductions.total,
            deductions.sss + deductions.philhealth + deductions.pagibig + deductions.late
        );
        assert_eq!(deductions.total, dec("470.00"));
    }

    #[test]
    fn test_negative_gross_is_rejected() {
        match calculate_deductions(dec("-1"), Decimal::ZERO, dec("100"), &create_test_contributions()) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "gross"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        assert!(matches!(
            calculate_deductions(dec("1000"), dec("10"), dec("-5"), &create_test_contributions()),
            Err(EngineError::InvalidAmount { .. })
        ));
    }
}
