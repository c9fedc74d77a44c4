//! The picker shown when felloe runs without a subcommand.

use console::{Key, Term, style};
use felloe_version::Version;

use super::ls::{self, ListArgs};
use crate::activation::Activator;
use crate::context::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Activate(Version),
    Uninstall(Version),
    Quit,
}

struct Picker {
    versions: Vec<Version>,
    active:   Option<Version>,
    cursor:   usize,
}

impl Picker {
    fn new(versions: Vec<Version>, active: Option<Version>) -> Self {
        let cursor = active
            .as_ref()
            .and_then(|a| versions.iter().position(|v| v == a))
            .unwrap_or(0);
        Self {
            versions,
            active,
            cursor,
        }
    }

    fn selected(&self) -> Option<Version> { self.versions.get(self.cursor).cloned() }

    fn handle(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::ArrowUp | Key::Char('k' | 'w') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            Key::ArrowDown | Key::Char('j' | 's') => {
                if self.cursor + 1 < self.versions.len() {
                    self.cursor += 1;
                }
                None
            }
            Key::Enter | Key::Char('i') => self.selected().map(Action::Activate),
            Key::Del | Key::Backspace | Key::Char('d') => self.selected().map(Action::Uninstall),
            Key::Escape | Key::CtrlC | Key::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .versions
            .iter()
            .enumerate()
            .map(|(i, version)| {
                let marker = if self.active.as_ref() == Some(version) { " *" } else { "" };
                if i == self.cursor {
                    format!("  {} {}{marker}", style("‣").cyan(), style(version).cyan().bold())
                } else {
                    format!("    {version}{marker}")
                }
            })
            .collect();
        lines.push(
            style("↑/↓ move, enter use, d uninstall, q quit")
                .dim()
                .to_string(),
        );
        lines
    }
}

/// Lets the user pick an installed version with the arrow keys. Without a
/// terminal it prints the same list `felloe list` does.
pub fn select(ctx: &Context) -> anyhow::Result<()> {
    let term = Term::stderr();
    if !term.is_term() {
        return ls::list(ctx, ListArgs { quiet: false });
    }

    let mut registry = ctx.registry()?;
    if registry.is_empty() {
        eprintln!("no helm versions installed");
        return Ok(());
    }
    let active = Activator::new(&registry).current().unwrap_or_else(|e| {
        tracing::warn!("{e}");
        None
    });

    let mut picker = Picker::new(registry.versions().cloned().collect(), active);
    term.hide_cursor()?;
    let action = run_picker(&term, &mut picker);
    term.show_cursor()?;

    match action? {
        Action::Activate(version) => super::install::switch(&registry, &version)?,
        Action::Uninstall(version) => {
            registry.remove(&version)?;
            eprintln!("{} helm {version}", style("removed").green().bold());
        }
        Action::Quit => {}
    }
    Ok(())
}

fn run_picker(term: &Term, picker: &mut Picker) -> std::io::Result<Action> {
    let drawn = picker.versions.len() + 1;
    loop {
        for line in picker.lines() {
            term.write_line(&line)?;
        }
        let action = picker.handle(term.read_key()?);
        term.clear_last_lines(drawn)?;
        if let Some(action) = action {
            return Ok(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(active: Option<&str>) -> Picker {
        let versions = ["3.14.0", "3.13.3", "2.17.0"].map(|v| Version::parse(v).unwrap());
        Picker::new(versions.to_vec(), active.map(|v| Version::parse(v).unwrap()))
    }

    #[test]
    fn cursor_starts_on_active_version() {
        assert_eq!(picker(Some("3.13.3")).cursor, 1);
        assert_eq!(picker(None).cursor, 0);
        assert_eq!(picker(Some("1.0.0")).cursor, 0);
    }

    #[test]
    fn movement_stays_in_bounds() {
        let mut picker = picker(None);
        assert_eq!(picker.handle(Key::ArrowUp), None);
        assert_eq!(picker.cursor, 0);
        for _ in 0..5 {
            picker.handle(Key::Char('j'));
        }
        assert_eq!(picker.cursor, 2);
        picker.handle(Key::Char('k'));
        assert_eq!(picker.cursor, 1);
    }

    #[test]
    fn keys_pick_actions() {
        let mut picker = picker(Some("3.14.0"));
        picker.handle(Key::ArrowDown);
        assert_eq!(picker.handle(Key::Enter), Some(Action::Activate(Version::new(3, 13, 3))));
        assert_eq!(picker.handle(Key::Char('d')), Some(Action::Uninstall(Version::new(3, 13, 3))));
        assert_eq!(picker.handle(Key::Char('q')), Some(Action::Quit));
        assert_eq!(picker.handle(Key::Char('x')), None);
    }

    #[test]
    fn lines_mark_active_and_end_with_help() {
        let lines = picker(Some("2.17.0")).lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("2.17.0") && lines[2].ends_with(" *"));
        assert!(lines[3].contains("q quit"));
    }
}
