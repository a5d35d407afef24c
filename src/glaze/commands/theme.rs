use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::theme::{Preferences, Theme, ThemeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

pub fn run<P: Preferences + ?Sized>(prefs: &mut P, action: ThemeAction) -> Result<CmdResult> {
    let mut store = ThemeStore::new(prefs);
    match action {
        ThemeAction::Show => Ok(CmdResult::default().with_theme(store.get()?)),
        ThemeAction::Set(theme) => {
            store.set(theme)?;
            let mut result = CmdResult::default().with_theme(theme);
            result.add_message(CmdMessage::success(format!("Theme set to {}", theme)));
            Ok(result)
        }
        ThemeAction::Toggle => {
            let theme = store.toggle()?;
            let mut result = CmdResult::default().with_theme(theme);
            result.add_message(CmdMessage::success(format!("Theme switched to {}", theme)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryPreferences;

    #[test]
    fn show_defaults_to_light() {
        let mut prefs = MemoryPreferences::new();
        let result = run(&mut prefs, ThemeAction::Show).unwrap();
        assert_eq!(result.theme, Some(Theme::Light));
    }

    #[test]
    fn set_then_toggle() {
        let mut prefs = MemoryPreferences::new();
        run(&mut prefs, ThemeAction::Set(Theme::Dark)).unwrap();
        let result = run(&mut prefs, ThemeAction::Toggle).unwrap();
        assert_eq!(result.theme, Some(Theme::Light));
        assert_eq!(result.messages[0].content, "Theme switched to light");
    }
}
