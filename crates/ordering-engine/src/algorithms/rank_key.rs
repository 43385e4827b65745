//! Rank Key Generation
//!
//! Computes a key strictly between two neighbors by walking both keys
//! symbol by symbol. A missing lower bound pads with `MIN_INDEX`, a missing
//! upper bound pads with `MAX_INDEX`. At the first position where the
//! padded indices differ by more than one, the midpoint symbol is appended
//! and the walk stops; otherwise the lower symbol is copied and the walk
//! moves on.
//!
//! Keys are unbounded-precision order markers. Length only grows when the
//! neighbors are adjacent at some position, and repeated insertion at the
//! same boundary grows keys without limit. No rebalancing is done here.
//!
//! The walk needs at most `max(len(prev), len(next)) + 1` steps: past the
//! end of both keys the padded bounds are `MIN_INDEX` and `MAX_INDEX`,
//! whose gap always exceeds one.

use crate::domain::alphabet::{self, MAX_INDEX, MIN_INDEX};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::RankKey;

/// Key strictly between `prev` and `next`; `None` is an open boundary.
///
/// Fails with `InvalidRange` if `prev >= next`, or if no key can sort
/// between them (`next` is `prev` followed only by `'0'` symbols, e.g.
/// `before("0")`).
pub fn between(prev: Option<&RankKey>, next: Option<&RankKey>) -> Result<RankKey, OrderingError> {
    let lower = prev.map_or(&[][..], RankKey::as_bytes);

    if let Some(upper) = next {
        if !has_room(lower, upper.as_bytes()) {
            return Err(OrderingError::InvalidRange {
                prev: prev.map(ToString::to_string).unwrap_or_default(),
                next: upper.to_string(),
            });
        }
    }

    Ok(walk(lower, next.map(RankKey::as_bytes)))
}

/// Key strictly after `prev`. Never fails.
pub fn after(prev: &RankKey) -> RankKey {
    walk(prev.as_bytes(), None)
}

/// Key strictly before `next`.
pub fn before(next: &RankKey) -> Result<RankKey, OrderingError> {
    between(None, Some(next))
}

/// Key for the first item of an empty collection.
pub fn initial() -> RankKey {
    walk(&[], None)
}

/// Key placing a new item after the current last item of its collection.
pub fn rank_for_append(last: Option<&RankKey>) -> RankKey {
    match last {
        Some(last) => after(last),
        None => initial(),
    }
}

/// True when some key sorts strictly between `lower` and `upper`.
fn has_room(lower: &[u8], upper: &[u8]) -> bool {
    if lower >= upper {
        return false;
    }
    match upper.strip_prefix(lower) {
        // Nothing fits between "a" and "a0", "a00", ...
        Some(rest) => rest.iter().any(|&s| s != alphabet::symbol_at(MIN_INDEX)),
        None => true,
    }
}

fn index_at(key: &[u8], position: usize, pad: u8) -> u8 {
    key.get(position)
        .and_then(|&symbol| alphabet::index_of(symbol))
        .unwrap_or(pad)
}

fn walk(lower: &[u8], upper: Option<&[u8]>) -> RankKey {
    let limit = lower.len().max(upper.map_or(0, <[u8]>::len));
    let mut symbols = Vec::with_capacity(limit + 1);

    for position in 0..limit {
        let left = index_at(lower, position, MIN_INDEX);
        let right = upper.map_or(MAX_INDEX, |u| index_at(u, position, MAX_INDEX));

        if right > left + 1 {
            symbols.push(alphabet::symbol_at((left + right) / 2));
            return RankKey::from_symbols(symbols);
        }
        symbols.push(alphabet::symbol_at(left));
    }

    // Past the end of both keys
    symbols.push(alphabet::symbol_at((MIN_INDEX + MAX_INDEX) / 2));
    RankKey::from_symbols(symbols)
}
