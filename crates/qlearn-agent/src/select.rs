//! Greedy selection with a fixed tie-break

/// Pick the candidate with the highest score
///
/// Ties go to the candidate seen first, so the result follows the enumeration
/// order of `candidates`. Returns `None` when there is nothing to choose from.
pub fn select_best<I, F>(candidates: I, mut score: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> f64,
{
    let mut best: Option<(I::Item, f64)> = None;
    for candidate in candidates {
        let value = score(&candidate);
        if best.as_ref().map_or(true, |(_, top)| value > *top) {
            best = Some((candidate, value));
        }
    }
    best.map(|(candidate, _)| candidate)
}
