use crate::models::direction::Direction;
use crate::models::path::ArbPath;
use crate::models::tick::Tick;

/// Simulate the three conversions of `path` against the tick's frozen
/// prices and return the fee-adjusted profit ratio.
///
/// Walks the legs in order, holding the base currency and `notional` at the
/// start. A `Forward` leg must be entered holding the pair's base asset and
/// yields `amount × price × (1 − fee)`; a `Reverse` leg must be entered
/// holding the quote asset and yields `(amount / price) × (1 − fee)`. Fees
/// compound multiplicatively across the three legs, so the result is
/// order-sensitive.
///
/// Returns `None` when a price is missing for this tick or a leg's
/// currency-chaining invariant fails (the path contributes nothing this
/// tick, never an error).
pub fn evaluate_path(
    path: &ArbPath,
    tick: &Tick,
    notional: f64,
    fee: f64,
    base: &str
) -> Option<f64> {
    let final_amount = convert_legs(path, tick, notional, fee, base)?;
    Some((final_amount - notional) / notional)
}

/// Leg-by-leg conversion shared by evaluation and simulated execution.
/// Returns the final base-currency amount after the third leg.
pub(super) fn convert_legs(
    path: &ArbPath,
    tick: &Tick,
    notional: f64,
    fee: f64,
    base: &str
) -> Option<f64> {
    let mut amount = notional;
    let mut held = base;

    for leg in &path.legs {
        let price = tick.price(&leg.symbol)?;
        let (leg_base, leg_quote) = leg.split_symbol()?;

        match leg.direction {
            Direction::Forward => {
                if held != leg_base {
                    return None;
                }
                amount = amount * price * (1.0 - fee);
                held = leg_quote;
            }
            Direction::Reverse => {
                if held != leg_quote {
                    return None;
                }
                amount = (amount / price) * (1.0 - fee);
                held = leg_base;
            }
        }
    }

    // Unreachable for pathfinder-produced paths, re-checked for loaded ones.
    if held != base {
        return None;
    }
    Some(amount)
}
