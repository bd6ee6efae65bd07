//! Fair penny distribution.
//!
//! Turns fractional raw shares into exact integer cents that sum to the
//! requested total. This is the single rounding point of the engine; every
//! ratio-based split goes through here so no cent is lost or duplicated.

use uuid::Uuid;

use crate::MoneyCents;

/// Distributes `total` over weighted raw shares with largest-remainder
/// rounding.
///
/// `raw_shares` carries, per key, the ideal share in fractional cents. The
/// caller guarantees the shares are non-negative and sum to `total` within
/// rounding error. Every returned amount differs from its raw share by less
/// than one cent and the amounts sum to `total` exactly.
///
/// The result is keyed deterministically: each raw share is floored, then
/// the shortfall cents go to the entries with the largest fractional
/// remainders, ties broken by ascending key. Shuffling the input order never
/// changes any key's amount; the output keeps the input order.
///
/// An empty input returns an empty result.
pub fn distribute(total: MoneyCents, raw_shares: &[(Uuid, f64)]) -> Vec<(Uuid, MoneyCents)> {
    if raw_shares.is_empty() {
        return Vec::new();
    }

    let mut cents: Vec<i64> = Vec::with_capacity(raw_shares.len());
    let mut remainders: Vec<f64> = Vec::with_capacity(raw_shares.len());
    for &(_, raw) in raw_shares {
        let raw = raw.max(0.0);
        let floor = raw.floor();
        cents.push(floor as i64);
        remainders.push(raw - floor);
    }

    let assigned: i64 = cents.iter().sum();
    let shortfall = (total.cents() - assigned).max(0) as usize;

    let mut order: Vec<usize> = (0..raw_shares.len()).collect();
    order.sort_by(|&a, &b| {
        remainders[b]
            .total_cmp(&remainders[a])
            .then_with(|| raw_shares[a].0.cmp(&raw_shares[b].0))
    });

    // Shortfall exceeding the entry count means the raw shares were
    // miscomputed upstream; clamp instead of wrapping around.
    for &idx in order.iter().take(shortfall.min(raw_shares.len())) {
        cents[idx] += 1;
    }

    raw_shares
        .iter()
        .zip(cents)
        .map(|(&(key, _), amount)| (key, MoneyCents::new(amount)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn key(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn distributes_exactly() {
        let shares = vec![(key(1), 333.33), (key(2), 333.33), (key(3), 333.34)];
        let result = distribute(MoneyCents::new(1000), &shares);

        let sum: MoneyCents = result.iter().map(|(_, a)| *a).sum();
        assert_eq!(sum.cents(), 1000);
        for ((_, raw), (_, amount)) in shares.iter().zip(&result) {
            assert!((amount.cents() as f64 - raw).abs() < 1.0);
        }
    }

    #[test]
    fn ties_break_by_ascending_key() {
        // Three equal thirds of $10.00: one extra cent exists and must go to
        // the smallest key.
        let shares = vec![
            (key(3), 1000.0 / 3.0),
            (key(1), 1000.0 / 3.0),
            (key(2), 1000.0 / 3.0),
        ];
        let result: HashMap<Uuid, i64> = distribute(MoneyCents::new(1000), &shares)
            .into_iter()
            .map(|(k, a)| (k, a.cents()))
            .collect();

        assert_eq!(result[&key(1)], 334);
        assert_eq!(result[&key(2)], 333);
        assert_eq!(result[&key(3)], 333);
    }

    #[test]
    fn shuffled_input_keys_identically() {
        let forward = vec![(key(1), 125.5), (key(2), 250.25), (key(3), 624.25)];
        let backward: Vec<_> = forward.iter().rev().copied().collect();

        let a: HashMap<Uuid, MoneyCents> =
            distribute(MoneyCents::new(1000), &forward).into_iter().collect();
        let b: HashMap<Uuid, MoneyCents> =
            distribute(MoneyCents::new(1000), &backward).into_iter().collect();

        assert_eq!(a, b);
    }

    #[test]
    fn no_shortfall_means_no_adjustment() {
        let shares = vec![(key(1), 600.0), (key(2), 400.0)];
        let result = distribute(MoneyCents::new(1000), &shares);
        assert_eq!(result[0].1.cents(), 600);
        assert_eq!(result[1].1.cents(), 400);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(distribute(MoneyCents::new(1000), &[]).is_empty());
    }
}
