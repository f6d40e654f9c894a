//! Tiered fare pricing.
//!
//! The fee is the greater of a per-mile and a per-hour charge, floored at
//! a minimum, with a 10% discount for shared rides. All amounts are
//! integer cents. Fixed policy constants; there is no per-market
//! configuration.

use chrono::Duration;

/// Minimum fee in cents. Zero duration and zero distance still pay this.
pub const MIN_FEE: i64 = 250;

/// Per-mile rate in cents.
pub const PER_MILE: i64 = 250;

/// Per-hour rate in cents.
pub const PER_HOUR: i64 = 3000;

/// Compute the fee in cents for a ride.
///
/// `by_distance` is `distance_miles * PER_MILE`. `by_time` charges
/// [`PER_HOUR`] per whole-minute-quantized hour: the duration is reduced
/// to whole minutes, then to whole hours, so 59 minutes bill as zero
/// hours. The base fee is the larger of the two, floored at [`MIN_FEE`]
/// and truncated to whole cents; a shared ride then pays 9/10 of that,
/// truncated, so the shared fee is exactly `floor(0.9 * unshared_fee)`.
///
/// Negative durations or distances are a precondition violation; ride
/// validation rejects them before pricing, and this function assumes
/// non-negative inputs.
pub fn ride_fee(duration: Duration, distance_miles: f64, shared: bool) -> i64 {
    let by_distance = PER_MILE as f64 * distance_miles;
    let whole_hours = duration.num_minutes() / 60;
    let by_time = PER_HOUR.saturating_mul(whole_hours) as f64;

    let base = by_distance.max(by_time).max(MIN_FEE as f64);
    let fee = base as i64;

    if shared {
        fee * 9 / 10
    } else {
        fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_table() {
        let cases = [
            // (duration, distance, shared, expected ¢)
            (Duration::seconds(1), 0.1, false, MIN_FEE),
            (Duration::minutes(3), 3.0, false, 750),
            (Duration::hours(7), 3.0, false, 7 * PER_HOUR),
            (Duration::minutes(3), 3.0, true, 675),
        ];
        for (duration, distance, shared, expected) in cases {
            assert_eq!(
                ride_fee(duration, distance, shared),
                expected,
                "duration={duration} distance={distance} shared={shared}"
            );
        }
    }

    #[test]
    fn zero_ride_pays_minimum() {
        assert_eq!(ride_fee(Duration::zero(), 0.0, false), MIN_FEE);
    }

    #[test]
    fn whole_minute_quantization() {
        // 59m59s is zero whole hours; 60m is one.
        assert_eq!(
            ride_fee(Duration::seconds(59 * 60 + 59), 0.0, false),
            MIN_FEE
        );
        assert_eq!(ride_fee(Duration::minutes(60), 0.0, false), PER_HOUR);
    }

    #[test]
    fn minimum_floor_always_holds() {
        for minutes in [0, 1, 59, 60, 600] {
            for distance in [0.0, 0.1, 0.99, 1.0, 30.0] {
                for shared in [false, true] {
                    let fee = ride_fee(Duration::minutes(minutes), distance, shared);
                    let floor = if shared { MIN_FEE * 9 / 10 } else { MIN_FEE };
                    assert!(fee >= floor, "fee {fee} below floor {floor}");
                }
            }
        }
    }

    #[test]
    fn shared_discount_truncates_from_unshared_fee() {
        // Includes fractional base fees, where discount-before-truncation
        // would disagree.
        for distance in [0.1, 3.0, 3.21, 8.47, 21.2] {
            for minutes in [0, 45, 90, 424] {
                let duration = Duration::minutes(minutes);
                let unshared = ride_fee(duration, distance, false);
                let shared = ride_fee(duration, distance, true);
                assert_eq!(shared, unshared * 9 / 10);
            }
        }
    }
}
