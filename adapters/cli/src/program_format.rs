//! Text rendering of action programs: one line per turn, one value per balloon.

use std::fmt::Write as _;

use loon_core::ActionProgram;

/// Renders `program` as `turn_count` lines of space separated deltas.
pub(crate) fn render(program: &ActionProgram) -> String {
    let mut text = String::with_capacity(program.turn_count() * (program.balloon_count() * 3 + 1));
    for changes in program.turns() {
        for (index, change) in changes.iter().enumerate() {
            if index > 0 {
                text.push(' ');
            }
            let _ = write!(text, "{}", change.delta());
        }
        text.push('\n');
    }
    text
}
