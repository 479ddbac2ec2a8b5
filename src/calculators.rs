//! Financial calculation engine
//!
//! Deterministic, stateless numeric transforms behind the calculator UI.
//! Every operation is total: malformed input coerces to a default instead of
//! failing, so the UI never has to render an error state.

use crate::models::{EmiResult, FdResult, SipResult};

/// Standard exemption subtracted from gross income before slabs apply.
pub const STANDARD_EXEMPTION: f64 = 250_000.0;

/// Slab boundaries on taxable income (after the exemption).
const SLAB_5_PCT_CEILING: f64 = 500_000.0;
const SLAB_20_PCT_CEILING: f64 = 1_250_000.0;

//
// ================= Input Coercion =================
//

/// Parse a raw UI field into a number, coercing failure to `0`.
///
/// Accepts comma grouping and a leading currency sign ("₹1,50,000" parses as
/// 150000). Anything that still fails to parse is `0` — the engine never
/// signals an error for bad input.
pub fn parse_field(raw: &str) -> f64 {
    parse_field_or(raw, 0.0)
}

/// Parse a raw UI field, coercing failure — or a parsed zero — to `default`.
/// Used for period counts (default 1) and the SIP expected return (default 12),
/// where zero is treated the same as missing.
pub fn parse_field_or(raw: &str, default: f64) -> f64 {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return default;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value != 0.0 => value,
        _ => default,
    }
}

//
// ================= Tax =================
//

/// Compute income tax from gross income and total deductions.
///
/// Taxable income is `max(0, income - deductions - 250000)`; slabs are
/// 5% up to 5L, 20% up to 12.5L, 30% above. Negative inputs are treated
/// as zero.
pub fn compute_tax(gross_income: f64, total_deductions: f64) -> f64 {
    let gross_income = gross_income.max(0.0);
    let total_deductions = total_deductions.max(0.0);

    let taxable_income = (gross_income - total_deductions - STANDARD_EXEMPTION).max(0.0);

    let mut tax = 0.0;
    if taxable_income > SLAB_20_PCT_CEILING {
        tax += (taxable_income - SLAB_20_PCT_CEILING) * 0.30;
        tax += (SLAB_20_PCT_CEILING - SLAB_5_PCT_CEILING) * 0.20;
        tax += SLAB_5_PCT_CEILING * 0.05;
    } else if taxable_income > SLAB_5_PCT_CEILING {
        tax += (taxable_income - SLAB_5_PCT_CEILING) * 0.20;
        tax += SLAB_5_PCT_CEILING * 0.05;
    } else if taxable_income > 0.0 {
        tax += taxable_income * 0.05;
    }

    tax
}

//
// ================= SIP =================
//

/// Compute the maturity value of a monthly SIP.
///
/// Future value of an annuity due at monthly rate `r` over `years * 12`
/// periods. A zero return rate degenerates to plain accumulation
/// (`maturity = P * n`); the closed form divides by zero there.
pub fn compute_sip(monthly_amount: f64, years: f64, annual_return_pct: f64) -> SipResult {
    let p = monthly_amount;
    let r = annual_return_pct / 100.0 / 12.0;
    let n = years * 12.0;

    let maturity_amount = if r == 0.0 {
        p * n
    } else {
        p * (((1.0 + r).powf(n) - 1.0) / r) * (1.0 + r)
    };

    let total_investment = p * n;
    let total_gains = maturity_amount - total_investment;

    SipResult {
        maturity_amount,
        total_investment,
        total_gains,
    }
}

//
// ================= EMI =================
//

/// Compute the equated monthly installment for a loan.
///
/// Standard amortization at monthly rate `r` over `years * 12` periods.
/// A zero interest rate degenerates to straight principal division
/// (`emi = P / n`). A non-positive term has no schedule at all and yields
/// a zeroed result — the formula is non-finite at `n = 0`.
pub fn compute_emi(loan_amount: f64, annual_rate_pct: f64, years: f64) -> EmiResult {
    let p = loan_amount;
    let r = annual_rate_pct / 100.0 / 12.0;
    let n = years * 12.0;

    if n <= 0.0 {
        return EmiResult {
            emi: 0.0,
            total_amount: 0.0,
            total_interest: 0.0,
        };
    }

    let emi = if r == 0.0 {
        p / n
    } else {
        let growth = (1.0 + r).powf(n);
        p * r * growth / (growth - 1.0)
    };

    let total_amount = emi * n;
    let total_interest = total_amount - p;

    EmiResult {
        emi,
        total_amount,
        total_interest,
    }
}

//
// ================= FD =================
//

/// Compute fixed deposit maturity with annual compounding.
/// Fractional years are allowed.
pub fn compute_fd(principal: f64, annual_rate_pct: f64, years: f64) -> FdResult {
    let p = principal;
    let r = annual_rate_pct / 100.0;

    let maturity_amount = p * (1.0 + r).powf(years);
    let interest = maturity_amount - p;

    FdResult {
        maturity_amount,
        interest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REL_TOLERANCE: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() / scale < REL_TOLERANCE,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_parse_field_coercion() {
        assert_eq!(parse_field("100000"), 100000.0);
        assert_eq!(parse_field("1,50,000"), 150000.0);
        assert_eq!(parse_field("₹2,000.50"), 2000.50);
        assert_eq!(parse_field("not a number"), 0.0);
        assert_eq!(parse_field(""), 0.0);
        assert_eq!(parse_field("   "), 0.0);
    }

    #[test]
    fn test_parse_field_or_defaults() {
        assert_eq!(parse_field_or("", 1.0), 1.0);
        assert_eq!(parse_field_or("garbage", 12.0), 12.0);
        assert_eq!(parse_field_or("5", 12.0), 5.0);
        // Zero counts as missing, same as the UI's falsy handling
        assert_eq!(parse_field_or("0", 1.0), 1.0);
        assert_eq!(parse_field_or("0", 12.0), 12.0);
    }

    #[test]
    fn test_tax_zero_and_exemption_boundary() {
        assert_eq!(compute_tax(0.0, 0.0), 0.0);
        assert_eq!(compute_tax(250_000.0, 0.0), 0.0);
        // Deductions alone can push taxable income to zero
        assert_eq!(compute_tax(400_000.0, 150_000.0), 0.0);
    }

    #[test]
    fn test_tax_second_slab() {
        // taxable = 760000 - 250000 = 510000 → 500000*0.05 + 10000*0.20
        assert_close(compute_tax(760_000.0, 0.0), 27_000.0);
    }

    #[test]
    fn test_tax_top_slab() {
        // taxable = 2,250,000 - 250,000 = 2,000,000
        let taxable = 2_250_000.0 - 250_000.0;
        let expected = 500_000.0 * 0.05 + 750_000.0 * 0.20 + (taxable - 1_250_000.0) * 0.30;
        assert_close(compute_tax(2_250_000.0, 0.0), expected);
    }

    #[test]
    fn test_tax_monotonic_in_income() {
        let mut prev = 0.0;
        for income in (0..30).map(|i| i as f64 * 100_000.0) {
            let tax = compute_tax(income, 50_000.0);
            assert!(tax >= prev, "tax decreased at income {}", income);
            prev = tax;
        }
    }

    #[test]
    fn test_tax_monotonic_in_deductions() {
        let mut prev = f64::MAX;
        for deductions in (0..15).map(|i| i as f64 * 50_000.0) {
            let tax = compute_tax(1_500_000.0, deductions);
            assert!(tax <= prev, "tax increased at deductions {}", deductions);
            prev = tax;
        }
    }

    #[test]
    fn test_tax_negative_inputs_coerce_to_zero() {
        assert_eq!(compute_tax(-500_000.0, 0.0), 0.0);
        // Negative deductions must not inflate taxable income
        assert_close(
            compute_tax(760_000.0, -100_000.0),
            compute_tax(760_000.0, 0.0),
        );
    }

    #[test]
    fn test_sip_zero_rate_accumulates_plainly() {
        let result = compute_sip(5_000.0, 10.0, 0.0);
        assert_close(result.maturity_amount, 5_000.0 * 120.0);
        assert_close(result.total_investment, 5_000.0 * 120.0);
        assert_close(result.total_gains, 0.0);
    }

    #[test]
    fn test_sip_positive_rate_beats_investment() {
        let result = compute_sip(5_000.0, 10.0, 12.0);
        assert!(result.maturity_amount > result.total_investment);
        assert_close(
            result.total_gains,
            result.maturity_amount - result.total_investment,
        );
    }

    #[test]
    fn test_sip_annuity_due_formula() {
        // One year at 12% annual → r = 0.01, n = 12
        let result = compute_sip(1_000.0, 1.0, 12.0);
        let r: f64 = 0.01;
        let expected = 1_000.0 * ((1.0 + r).powf(12.0) - 1.0) / r * (1.0 + r);
        assert_close(result.maturity_amount, expected);
    }

    #[test]
    fn test_emi_round_trip() {
        let result = compute_emi(2_500_000.0, 8.5, 20.0);
        assert_close(result.total_amount, result.emi * 240.0);
        assert_close(result.total_amount, result.total_interest + 2_500_000.0);
    }

    #[test]
    fn test_emi_positive_interest() {
        for (p, rate, years) in [
            (100_000.0, 1.0, 1.0),
            (2_500_000.0, 8.5, 20.0),
            (50_000.0, 24.0, 0.5),
        ] {
            let result = compute_emi(p, rate, years);
            assert!(
                result.total_interest > 0.0,
                "expected positive interest for P={} rate={} years={}",
                p,
                rate,
                years
            );
        }
    }

    #[test]
    fn test_emi_zero_tenure_stays_finite() {
        for rate in [0.0, 10.0] {
            let result = compute_emi(100_000.0, rate, 0.0);
            assert!(result.emi.is_finite());
            assert!(result.total_amount.is_finite());
            assert!(result.total_interest.is_finite());
            assert_eq!(result.emi, 0.0);
            assert_eq!(result.total_amount, 0.0);
            assert_eq!(result.total_interest, 0.0);
        }
        // The request path can't even reach a zero term: "0" coerces to 1 year
        let coerced = compute_emi(100_000.0, 10.0, parse_field_or("0", 1.0));
        assert!(coerced.emi.is_finite());
        assert!(coerced.total_interest > 0.0);
    }

    #[test]
    fn test_emi_zero_rate_divides_principal() {
        let result = compute_emi(120_000.0, 0.0, 1.0);
        assert_close(result.emi, 10_000.0);
        assert_close(result.total_interest, 0.0);
    }

    #[test]
    fn test_fd_single_period_exact() {
        let result = compute_fd(100_000.0, 10.0, 1.0);
        assert_close(result.maturity_amount, 110_000.0);
        assert_close(result.interest, 10_000.0);
    }

    #[test]
    fn test_fd_fractional_years() {
        let result = compute_fd(100_000.0, 10.0, 0.5);
        assert_close(result.maturity_amount, 100_000.0 * 1.1_f64.powf(0.5));
    }
}
