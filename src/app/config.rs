use gtk::gdk;
use gtk4 as gtk;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StopRecording,
    CancelSelection,
}

impl Action {
    pub fn label(&self) -> &str {
        match self {
            Action::StopRecording => "Stop Recording",
            Action::CancelSelection => "Cancel Selection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: gdk::Key,
    pub modifiers: gdk::ModifierType,
}

impl Shortcut {
    fn plain(key: gdk::Key) -> Self {
        Self {
            key,
            modifiers: gdk::ModifierType::empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    bindings: HashMap<Action, Vec<Shortcut>>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(
            Action::StopRecording,
            vec![
                Shortcut::plain(gdk::Key::q),
                Shortcut::plain(gdk::Key::Escape),
            ],
        );
        bindings.insert(
            Action::CancelSelection,
            vec![Shortcut::plain(gdk::Key::Escape)],
        );

        Self { bindings }
    }
}

impl ShortcutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the key event triggers `action`
    pub fn matches(&self, action: Action, key: gdk::Key, modifiers: gdk::ModifierType) -> bool {
        // Filter out irrelevant modifiers like NumLock/CapsLock/ScrollLock
        let mask = gdk::ModifierType::CONTROL_MASK
            | gdk::ModifierType::SHIFT_MASK
            | gdk::ModifierType::ALT_MASK
            | gdk::ModifierType::SUPER_MASK
            | gdk::ModifierType::META_MASK;

        let clean_mods = modifiers & mask;

        self.bindings
            .get(&action)
            .map(|shortcuts| {
                shortcuts
                    .iter()
                    .any(|sc| sc.key == key && sc.modifiers == clean_mods)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_and_escape_stop_recording() {
        let config = ShortcutConfig::new();
        let none = gdk::ModifierType::empty();
        assert!(config.matches(Action::StopRecording, gdk::Key::q, none));
        assert!(config.matches(Action::StopRecording, gdk::Key::Escape, none));
        assert!(!config.matches(Action::StopRecording, gdk::Key::w, none));
    }

    #[test]
    fn lock_modifiers_are_ignored() {
        let config = ShortcutConfig::new();
        assert!(config.matches(
            Action::StopRecording,
            gdk::Key::q,
            gdk::ModifierType::LOCK_MASK
        ));
        assert!(!config.matches(
            Action::StopRecording,
            gdk::Key::q,
            gdk::ModifierType::CONTROL_MASK
        ));
    }

    #[test]
    fn quit_key_does_not_cancel_selection() {
        let config = ShortcutConfig::new();
        let none = gdk::ModifierType::empty();
        assert!(config.matches(Action::CancelSelection, gdk::Key::Escape, none));
        assert!(!config.matches(Action::CancelSelection, gdk::Key::q, none));
        assert_eq!(Action::CancelSelection.label(), "Cancel Selection");
    }
}
