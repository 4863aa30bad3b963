// In crates/strategies/src/crossover.rs

/// The direction in which a fast line crossed a slow line on the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Fast line was strictly below and is now strictly above.
    Bullish,
    /// Fast line was strictly above and is now strictly below.
    Bearish,
    /// No strict sign change, including any tie on either bar.
    None,
}

/// Compares the last two aligned points of `fast` and `slow`.
///
/// Returns `None` when either series holds fewer than two values.
pub fn detect_crossover(fast: &[f64], slow: &[f64]) -> Option<Crossover> {
    let [fast_prev, fast_now] = last_two(fast)?;
    let [slow_prev, slow_now] = last_two(slow)?;

    let crossover = if fast_now > slow_now && fast_prev < slow_prev {
        Crossover::Bullish
    } else if fast_now < slow_now && fast_prev > slow_prev {
        Crossover::Bearish
    } else {
        Crossover::None
    };
    Some(crossover)
}

fn last_two(values: &[f64]) -> Option<[f64; 2]> {
    match values {
        [.., prev, now] => Some([*prev, *now]),
        _ => None,
    }
}
