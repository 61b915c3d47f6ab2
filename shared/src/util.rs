use rust_decimal::Decimal;

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Line-item subtotal: unit price times quantity, rounded to 2 decimal places.
///
/// All money arithmetic goes through `Decimal`; floats never touch totals.
pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
    (unit_price * Decimal::from(quantity)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn subtotal_multiplies_and_rounds() {
        assert_eq!(line_subtotal(d("4.50"), 3), d("13.50"));
        assert_eq!(line_subtotal(d("3.333"), 3), d("10.00"));
    }

    #[test]
    fn subtotal_of_zero_quantity_is_zero() {
        assert_eq!(line_subtotal(d("9.99"), 0), d("0.00"));
    }

    #[test]
    fn subtotal_keeps_cents_exact() {
        // The classic float trap: 0.10 * 3 must be exactly 0.30
        assert_eq!(line_subtotal(d("0.10"), 3), d("0.30"));
    }

    #[test]
    fn now_millis_is_monotonic_enough() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
    }
}
