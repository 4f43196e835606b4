/// Input action produced from a raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Step to the next revision
    AdvanceRevision,
    /// Leave the interactive loop
    Quit,
    /// No action
    None,
}

/// Process a single key press.
pub fn process_key(key: char) -> InputAction {
    match key {
        'x' | 'X' => InputAction::AdvanceRevision,
        'q' => InputAction::Quit,
        _ => InputAction::None,
    }
}

/// Process one line of terminal input. Only the first non-blank character
/// counts, so `x<Enter>` behaves like the key alone.
pub fn process_line(line: &str) -> InputAction {
    line.trim_start().chars().next().map(process_key).unwrap_or(InputAction::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_advances_either_case() {
        assert_eq!(process_key('x'), InputAction::AdvanceRevision);
        assert_eq!(process_key('X'), InputAction::AdvanceRevision);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(process_key('q'), InputAction::Quit);
        assert_eq!(process_key('Q'), InputAction::None);
        assert_eq!(process_key(' '), InputAction::None);
    }

    #[test]
    fn lines_use_first_visible_character() {
        assert_eq!(process_line("  x\n"), InputAction::AdvanceRevision);
        assert_eq!(process_line("quit"), InputAction::Quit);
        assert_eq!(process_line("\n"), InputAction::None);
    }
}
