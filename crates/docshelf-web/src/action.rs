//! Buttons rendered into the content area.

use docshelf_viewer::ClickTarget;

/// Map a `data-action` button to its click target.
///
/// Error views render `retry` and `home` buttons with a `data-path`; any
/// other action, or one without a path, is not ours.
pub(crate) fn action_target(action: &str, path: Option<String>) -> Option<ClickTarget> {
    let path = path?;
    match action {
        "retry" => Some(ClickTarget::Retry { path }),
        "home" => Some(ClickTarget::Home { path }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_actions() {
        assert_eq!(
            action_target("retry", Some("api.html".to_owned())),
            Some(ClickTarget::Retry {
                path: "api.html".to_owned()
            })
        );
        assert_eq!(
            action_target("home", Some("start.html".to_owned())),
            Some(ClickTarget::Home {
                path: "start.html".to_owned()
            })
        );
    }

    #[test]
    fn test_unknown_or_incomplete_actions() {
        assert_eq!(action_target("print", Some("x".to_owned())), None);
        assert_eq!(action_target("retry", None), None);
    }
}
