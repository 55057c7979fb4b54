//! Preview input
//!
//! The session reacts to key-press edges, not held keys. A backend reports the
//! set of keys held this frame; [`KeyboardTracker`] compares it with the
//! previous frame and yields the keys that went down.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

/// Keys the preview session responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKey {
    /// Move the menu selection up (Up arrow)
    SelectUp,
    /// Move the menu selection down (Down arrow)
    SelectDown,
    /// Render the selected material (Enter)
    Confirm,
    /// Cycle to the next preview shape (Tab)
    ToggleShape,
    /// Switch between the help overlay and the material menu (F1)
    ToggleMenu,
    /// Reload material definitions (F2)
    Reload,
}

impl PreviewKey {
    /// Every key, in the order edges are reported
    pub const ALL: [Self; 6] = [
        Self::ToggleMenu,
        Self::Reload,
        Self::ToggleShape,
        Self::SelectUp,
        Self::SelectDown,
        Self::Confirm,
    ];

    /// Name of the physical key bound to this action
    pub const fn key_name(self) -> &'static str {
        match self {
            Self::SelectUp => "Up",
            Self::SelectDown => "Down",
            Self::Confirm => "Enter",
            Self::ToggleShape => "Tab",
            Self::ToggleMenu => "F1",
            Self::Reload => "F2",
        }
    }

    /// Command word used by text drivers
    pub const fn command(self) -> &'static str {
        match self {
            Self::SelectUp => "up",
            Self::SelectDown => "down",
            Self::Confirm => "render",
            Self::ToggleShape => "shape",
            Self::ToggleMenu => "menu",
            Self::Reload => "reload",
        }
    }

    const fn flag(self) -> KeySet {
        match self {
            Self::SelectUp => KeySet::SELECT_UP,
            Self::SelectDown => KeySet::SELECT_DOWN,
            Self::Confirm => KeySet::CONFIRM,
            Self::ToggleShape => KeySet::TOGGLE_SHAPE,
            Self::ToggleMenu => KeySet::TOGGLE_MENU,
            Self::Reload => KeySet::RELOAD,
        }
    }
}

impl fmt::Display for PreviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

/// Error for unknown key or command names
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown key '{0}'")]
pub struct UnknownKey(pub String);

impl FromStr for PreviewKey {
    type Err = UnknownKey;

    /// Accepts either the command word or the key name, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| {
                name.eq_ignore_ascii_case(key.command()) || name.eq_ignore_ascii_case(key.key_name())
            })
            .ok_or_else(|| UnknownKey(name.to_string()))
    }
}

bitflags! {
    /// Set of preview keys held in one frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeySet: u8 {
        /// Up arrow
        const SELECT_UP = 1 << 0;
        /// Down arrow
        const SELECT_DOWN = 1 << 1;
        /// Enter
        const CONFIRM = 1 << 2;
        /// Tab
        const TOGGLE_SHAPE = 1 << 3;
        /// F1
        const TOGGLE_MENU = 1 << 4;
        /// F2
        const RELOAD = 1 << 5;
    }
}

impl KeySet {
    /// Set holding a single key
    pub const fn key(key: PreviewKey) -> Self {
        key.flag()
    }

    /// Whether `key` is in the set
    pub fn holds(self, key: PreviewKey) -> bool {
        self.contains(key.flag())
    }

    /// Keys in the set, in [`PreviewKey::ALL`] order
    pub fn keys(self) -> impl Iterator<Item = PreviewKey> {
        PreviewKey::ALL.into_iter().filter(move |key| self.holds(*key))
    }
}

impl Default for KeySet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<PreviewKey> for KeySet {
    fn from(key: PreviewKey) -> Self {
        key.flag()
    }
}

impl FromIterator<PreviewKey> for KeySet {
    fn from_iter<I: IntoIterator<Item = PreviewKey>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, key| set | key.flag())
    }
}

/// Edge detector over successive held-key snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardTracker {
    previous: KeySet,
    current: KeySet,
}

impl KeyboardTracker {
    /// Tracker with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's held keys and return the keys that went down
    pub fn update(&mut self, held: KeySet) -> KeySet {
        self.previous = self.current;
        self.current = held;
        self.pressed()
    }

    /// Keys held now but not in the previous frame
    pub fn pressed(&self) -> KeySet {
        self.current - self.previous
    }

    /// Keys held in the previous frame but not now
    pub fn released(&self) -> KeySet {
        self.previous - self.current
    }

    /// Keys held now
    pub const fn held(&self) -> KeySet {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("up".parse::<PreviewKey>(), Ok(PreviewKey::SelectUp));
        assert_eq!("F1".parse::<PreviewKey>(), Ok(PreviewKey::ToggleMenu));
        assert_eq!(" Render ".parse::<PreviewKey>(), Ok(PreviewKey::Confirm));
        assert_eq!("tab".parse::<PreviewKey>(), Ok(PreviewKey::ToggleShape));
        assert!("escape".parse::<PreviewKey>().is_err());
    }

    #[test]
    fn test_key_set_membership() {
        let set: KeySet = [PreviewKey::Confirm, PreviewKey::SelectUp].into_iter().collect();
        assert!(set.holds(PreviewKey::Confirm));
        assert!(!set.holds(PreviewKey::Reload));
        assert_eq!(
            set.keys().collect::<Vec<_>>(),
            vec![PreviewKey::SelectUp, PreviewKey::Confirm]
        );
    }

    #[test]
    fn test_tracker_reports_edges_once() {
        let mut tracker = KeyboardTracker::new();
        let down = KeySet::key(PreviewKey::SelectDown);

        assert_eq!(tracker.update(down), down);
        // Still held: no new edge
        assert_eq!(tracker.update(down), KeySet::empty());
        assert_eq!(tracker.update(KeySet::empty()), KeySet::empty());
        assert_eq!(tracker.released(), down);
        assert_eq!(tracker.update(down), down);
    }

    #[test]
    fn test_tracker_mixed_keys() {
        let mut tracker = KeyboardTracker::new();
        tracker.update(KeySet::CONFIRM);
        let pressed = tracker.update(KeySet::CONFIRM | KeySet::TOGGLE_SHAPE);
        assert_eq!(pressed, KeySet::TOGGLE_SHAPE);
        assert_eq!(tracker.held(), KeySet::CONFIRM | KeySet::TOGGLE_SHAPE);
    }
}
