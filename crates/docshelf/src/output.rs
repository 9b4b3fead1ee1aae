//! Terminal reporting for the CLI commands.

use std::fmt::Display;
use std::ops::Range;

use console::{Style, Term};

/// How a line is coloured.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Tone {
    Plain,
    Good,
    Caution,
    Bad,
    Heading,
}

/// Writes command reports to stderr.
pub(crate) struct Output {
    term: Term,
    good: Style,
    caution: Style,
    bad: Style,
    heading: Style,
    hit: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            good: Style::new().green(),
            caution: Style::new().yellow(),
            bad: Style::new().red(),
            heading: Style::new().cyan().bold(),
            hit: Style::new().black().on_yellow(),
        }
    }

    /// Write one line in the given tone.
    pub(crate) fn line(&self, tone: Tone, msg: impl Display) {
        let style = match tone {
            Tone::Plain => None,
            Tone::Good => Some(&self.good),
            Tone::Caution => Some(&self.caution),
            Tone::Bad => Some(&self.bad),
            Tone::Heading => Some(&self.heading),
        };
        let text = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_string(),
        };
        let _ = self.term.write_line(&text);
    }

    /// Report a page that loaded.
    pub(crate) fn page_loaded(&self, label: &str, path: impl Display) {
        self.line(Tone::Good, format_args!("  ok    {label} ({path})"));
    }

    /// Report a page that failed to load.
    pub(crate) fn page_failed(&self, label: &str, path: impl Display, error: impl Display) {
        self.line(Tone::Bad, format_args!("  FAIL  {label} ({path}): {error}"));
    }

    /// Report a sidebar entry with nothing to load.
    pub(crate) fn page_skipped(&self, label: &str) {
        self.line(Tone::Caution, format_args!("  skip  {label} (no path)"));
    }

    /// `text` with the `matches` byte ranges styled as search hits.
    pub(crate) fn marked(&self, text: &str, matches: &[Range<usize>]) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for range in matches {
            let (Some(before), Some(hit)) = (text.get(cursor..range.start), text.get(range.clone()))
            else {
                continue;
            };
            out.push_str(before);
            out.push_str(&self.hit.apply_to(hit).to_string());
            cursor = range.end;
        }
        out.push_str(text.get(cursor..).unwrap_or_default());
        out
    }
}
