// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Canonical textual renderings shared by column statistics (C12) and the
//! partition computer (C14): float formatting and decimal base-10
//! reconstruction.

use strata_type::Decimal;

/// Values in `[1e-3, 1e7]` print fixed with trailing zeros trimmed (but
/// at least one digit after the point); outside that range print
/// scientific notation with an upper-case `E`, an explicit sign only for
/// negative exponents, and the shortest exponent that round-trips.
pub fn format_float(v: f64) -> String {
    if v == 0.0 {
        return "0.0".to_string();
    }
    let abs = v.abs();
    if (1e-3..1e7).contains(&abs) {
        format_fixed_trimmed(v)
    } else {
        let exp = abs.log10().floor() as i32;
        let mantissa = v / 10f64.powi(exp);
        format!("{}E{}", format_fixed_trimmed(mantissa), exp)
    }
}

fn format_fixed_trimmed(v: f64) -> String {
    let mut s = format!("{v:.10}");
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') && s.len() > dot + 2 {
            s.pop();
        }
    }
    s
}

/// Reconstruct a decimal's base-10 textual form from its unscaled
/// integer and scale, e.g. `unscaled=12345, scale=2` -> `"123.45"`.
pub fn format_decimal(d: &Decimal) -> String {
    let digits = d.unscaled.to_string();
    let negative = digits.starts_with('-');
    let digits = digits.trim_start_matches('-');
    let scale = d.scale as usize;
    if scale == 0 {
        return if negative { format!("-{digits}") } else { digits.to_string() };
    }
    let padded = if digits.len() <= scale { format!("{:0>width$}", digits, width = scale + 1) } else { digits.to_string() };
    let split = padded.len() - scale;
    let (int_part, frac_part) = padded.split_at(split);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{int_part}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn fixed_range_trims_trailing_zeros() {
        assert_eq!(format_float(233.0), "233.0");
        assert_eq!(format_float(467.6647), "467.6647");
    }

    #[test]
    fn out_of_range_uses_scientific_notation() {
        assert_eq!(format_float(1.5e10), "1.5E10");
        assert_eq!(format_float(1.5e-10), "1.5E-10");
    }

    #[test]
    fn decimal_reconstructs_base_ten_form() {
        let d = Decimal::new(BigInt::from(12345), 10, 2);
        assert_eq!(format_decimal(&d), "123.45");
        let small = Decimal::new(BigInt::from(5), 10, 3);
        assert_eq!(format_decimal(&small), "0.005");
        let neg = Decimal::new(BigInt::from(-150), 10, 2);
        assert_eq!(format_decimal(&neg), "-1.50");
    }
}
