//! Per-tick phase update
//!
//! Advances every arc by exactly its speed. The phase is never wrapped.

use super::state::PatternState;

/// Advance the pattern by one tick
pub fn tick(state: &mut PatternState) {
    for arc in &mut state.arcs {
        arc.advance();
    }
    state.ticks += 1;
}
