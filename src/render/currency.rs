//! Indonesian Rupiah formatting matching the `id-ID` Intl currency output.

use crate::models::ImpactDirection;

/// Non-breaking space the `id-ID` locale places between symbol and digits.
const NBSP: char = '\u{a0}';

/// Format an IDR amount with zero decimals and `.` thousands separators,
/// e.g. `1000000.0` → `"Rp 1.000.000"` (with a non-breaking space).
///
/// Rounds half away from zero. Non-finite input renders as `-`.
pub fn format_idr(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}Rp{NBSP}{}", group_thousands(rounded.abs()))
}

/// Signed delta for a financial impact item: `+` for increase, `-` for
/// anything else. The magnitude is always unsigned.
pub fn format_signed_idr(amount: f64, direction: ImpactDirection) -> String {
    format!("{}{}", direction.sign(), format_idr(amount.abs()))
}

/// Ledger cell: the formatted amount, or `-` when absent or zero.
pub fn format_ledger_cell(amount: Option<f64>) -> String {
    match amount {
        Some(v) if v != 0.0 => format_idr(v),
        _ => "-".to_string(),
    }
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_thousands_separator() {
        assert_eq!(format_idr(1_000_000.0), "Rp\u{a0}1.000.000");
        assert_eq!(format_idr(12_345.0), "Rp\u{a0}12.345");
        assert_eq!(format_idr(999.0), "Rp\u{a0}999");
        assert_eq!(format_idr(0.0), "Rp\u{a0}0");
    }

    #[test]
    fn rounds_to_zero_decimals_half_away_from_zero() {
        assert_eq!(format_idr(1_499.5), "Rp\u{a0}1.500");
        assert_eq!(format_idr(1_499.49), "Rp\u{a0}1.499");
        assert_eq!(format_idr(-2.5), "-Rp\u{a0}3");
    }

    #[test]
    fn non_negative_never_has_sign_or_decimals() {
        for amount in [0.0, 0.4, 1.0, 750_000.75, 1e12, 123_456_789.123] {
            let text = format_idr(amount);
            assert!(!text.contains('-'), "{text}");
            assert!(!text.contains(','), "{text}");
        }
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        assert_eq!(format_idr(-0.0), "Rp\u{a0}0");
        assert_eq!(format_idr(-0.4), "Rp\u{a0}0");
    }

    #[test]
    fn large_amounts_group_correctly() {
        assert_eq!(format_idr(1_234_567_890_123.0), "Rp\u{a0}1.234.567.890.123");
    }

    #[test]
    fn non_finite_renders_dash() {
        assert_eq!(format_idr(f64::NAN), "-");
        assert_eq!(format_idr(f64::INFINITY), "-");
    }

    #[test]
    fn signed_delta_follows_direction() {
        assert_eq!(
            format_signed_idr(1_000_000.0, ImpactDirection::Increase),
            "+Rp\u{a0}1.000.000"
        );
        assert_eq!(
            format_signed_idr(500.0, ImpactDirection::Decrease),
            "-Rp\u{a0}500"
        );
        assert_eq!(
            format_signed_idr(-500.0, ImpactDirection::Decrease),
            "-Rp\u{a0}500"
        );
        assert_eq!(
            format_signed_idr(1_500.0, ImpactDirection::Neutral),
            "-Rp\u{a0}1.500"
        );
    }

    #[test]
    fn ledger_cell_dashes_absent_and_zero() {
        assert_eq!(format_ledger_cell(None), "-");
        assert_eq!(format_ledger_cell(Some(0.0)), "-");
        assert_eq!(format_ledger_cell(Some(250_000.0)), "Rp\u{a0}250.000");
    }
}
