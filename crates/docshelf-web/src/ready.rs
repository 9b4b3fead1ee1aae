//! Document readiness.

/// Whether a `document.readyState` value means the markup is still being
/// parsed, so the sidebar cannot be read yet.
pub(crate) fn is_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_waits_for_parse() {
        assert!(is_parsing("loading"));
    }

    #[test]
    fn test_parsed_states_start_immediately() {
        assert!(!is_parsing("interactive"));
        assert!(!is_parsing("complete"));
    }
}
