//! Classic search-space problems

use qlearn_core::{QLInput, RLError, Result, StateId, MIN_STATES};

use crate::Problem;

fn check_size(name: &str, num_states: usize) -> Result<()> {
    if num_states < MIN_STATES {
        return Err(RLError::Environment(format!(
            "{name} needs at least {MIN_STATES} states, got {num_states}"
        )));
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn index_features(num_states: usize) -> Vec<f64> {
    (0..num_states).map(|i| i as f64).collect()
}

/// Linear path `0 -> 1 -> ... -> n-1` with the goal at the end
pub fn chain(num_states: usize, reward: f64) -> Result<Problem<f64>> {
    check_size("chain", num_states)?;
    let goal = num_states - 1;
    let input = (0..goal)
        .map(|i| QLInput::new(i, i + 1).with_reward(reward))
        .collect();

    Ok(Problem {
        num_states,
        goals: vec![goal],
        input,
        features: index_features(num_states),
    })
}

/// Every state has a single edge to the goal (the last state)
pub fn star(num_states: usize, reward: f64) -> Result<Problem<f64>> {
    check_size("star", num_states)?;
    let goal = num_states - 1;
    let input = (0..goal)
        .map(|i| QLInput::new(i, goal).with_reward(reward))
        .collect();

    Ok(Problem {
        num_states,
        goals: vec![goal],
        input,
        features: index_features(num_states),
    })
}

/// Path that stops one state short of the goal
pub fn dead_end(num_states: usize) -> Result<Problem<f64>> {
    check_size("dead-end", num_states)?;
    let goal = num_states - 1;
    let input = (0..goal - 1).map(|i| QLInput::new(i, i + 1)).collect();

    Ok(Problem {
        num_states,
        goals: vec![goal],
        input,
        features: index_features(num_states),
    })
}

/// Four-connected grid world with the goal in the bottom-right corner
///
/// State `r * cols + c` is the cell at row `r`, column `c`; its feature is
/// the Manhattan distance to the goal. Moves toward the goal pay `reward`,
/// other moves pay nothing. Vertical moves span `cols` ids, so the trainer's
/// `neighbors` bound must be at least `cols`.
pub fn grid(rows: usize, cols: usize, reward: f64) -> Result<Problem<f64>> {
    if rows == 0 || cols == 0 {
        return Err(RLError::Environment(format!(
            "grid dimensions must be positive, got {rows}x{cols}"
        )));
    }
    let num_states = rows.checked_mul(cols).ok_or_else(|| {
        RLError::Environment(format!("grid {rows}x{cols} has too many states"))
    })?;
    check_size("grid", num_states)?;

    let goal = num_states - 1;
    let distance = |id: StateId| (rows - 1 - id / cols) + (cols - 1 - id % cols);

    let mut input = Vec::new();
    for id in 0..goal {
        let (r, c) = (id / cols, id % cols);
        let moves = [
            (c + 1 < cols).then(|| id + 1),
            (r + 1 < rows).then(|| id + cols),
            (c > 0).then(|| id - 1),
            (r > 0).then(|| id - cols),
        ];
        for to in moves.into_iter().flatten() {
            let pay = if distance(to) < distance(id) { reward } else { 0.0 };
            input.push(QLInput::new(id, to).with_reward(pay));
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let features = (0..num_states).map(|id| distance(id) as f64).collect();

    Ok(Problem {
        num_states,
        goals: vec![goal],
        input,
        features,
    })
}
