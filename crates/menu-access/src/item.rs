//! Menu item descriptors: the per-entry data model the bridge exposes.
//!
//! The owning menu keeps one [`MenuItemDescriptor`] per visible entry, in
//! display order. The bridge only reads descriptors; it never mutates them
//! and never runs an item's activation callback itself (activation is always
//! deferred through the host's message queue).

use std::fmt;
use std::sync::Arc;

use crate::mnemonic;

/// The activation callback attached to an item that supports a default
/// action.
pub type ItemActivation = Arc<dyn Fn() + Send + Sync>;

/// Description of a single menu entry.
///
/// # Example
///
/// ```
/// use menu_access::MenuItemDescriptor;
///
/// let item = MenuItemDescriptor::new("&Open").on_activate(|| {});
/// assert_eq!(item.display_text(), "Open");
/// assert_eq!(item.default_action_name(), Some("Execute"));
/// ```
#[derive(Clone)]
pub struct MenuItemDescriptor {
    /// Item text, possibly containing `&` mnemonic markup.
    pub text: String,
    /// When set, `text` is pre-formatted and exposed verbatim: no marker
    /// stripping, no mnemonic extraction.
    pub raw_text: bool,
    /// The item is a visual divider.
    pub separator: bool,
    /// Activating the item opens a nested menu.
    pub submenu: bool,
    /// The item does not accept interaction.
    pub disabled: bool,
    /// The item's checkmark is set.
    pub checked: bool,
    /// Present iff the item supports a default action.
    pub clicked: Option<ItemActivation>,
}

impl MenuItemDescriptor {
    /// Create an item with the given text and no other attributes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw_text: false,
            separator: false,
            submenu: false,
            disabled: false,
            checked: false,
            clicked: None,
        }
    }

    /// Create a separator entry.
    pub fn separator() -> Self {
        Self {
            separator: true,
            ..Self::new("")
        }
    }

    /// Mark the text as pre-formatted (no mnemonic markup).
    pub fn with_raw_text(mut self) -> Self {
        self.raw_text = true;
        self
    }

    /// Mark the item as opening a nested menu.
    pub fn with_submenu(mut self) -> Self {
        self.submenu = true;
        self
    }

    /// Set the disabled state.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Attach the default-action callback.
    pub fn on_activate(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.clicked = Some(Arc::new(callback));
        self
    }

    /// The text exposed as the item's accessible name.
    pub fn display_text(&self) -> String {
        if self.raw_text {
            self.text.clone()
        } else {
            mnemonic::strip_markers(&self.text)
        }
    }

    /// The mnemonic character, unless the text is raw or unmarked.
    pub fn mnemonic_char(&self) -> Option<char> {
        if self.raw_text {
            None
        } else {
            mnemonic::scan(&self.text).mnemonic
        }
    }

    /// Whether the item supports a default action.
    pub fn has_default_action(&self) -> bool {
        self.clicked.is_some()
    }

    /// The default-action name: "Open" for submenus, "Execute" for leaf
    /// items, none when the item has no activation callback.
    pub fn default_action_name(&self) -> Option<&'static str> {
        self.clicked.as_ref()?;
        Some(if self.submenu { "Open" } else { "Execute" })
    }
}

impl fmt::Debug for MenuItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItemDescriptor")
            .field("text", &self.text)
            .field("raw_text", &self.raw_text)
            .field("separator", &self.separator)
            .field("submenu", &self.submenu)
            .field("disabled", &self.disabled)
            .field("checked", &self.checked)
            .field("clicked", &self.clicked.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_display_text_strips_markup() {
        let item = MenuItemDescriptor::new("&Cut");
        assert_eq!(item.display_text(), "Cut");
        assert_eq!(item.mnemonic_char(), Some('c'));
    }

    #[test]
    fn test_raw_text_is_verbatim() {
        let item = MenuItemDescriptor::new("Fish && Chips").with_raw_text();
        assert_eq!(item.display_text(), "Fish && Chips");
        assert_eq!(item.mnemonic_char(), None);
    }

    #[test]
    fn test_default_action_name() {
        let leaf = MenuItemDescriptor::new("Cut").on_activate(|| {});
        assert_eq!(leaf.default_action_name(), Some("Execute"));

        let submenu = MenuItemDescriptor::new("Recent").with_submenu().on_activate(|| {});
        assert_eq!(submenu.default_action_name(), Some("Open"));

        let inert = MenuItemDescriptor::new("Label");
        assert_eq!(inert.default_action_name(), None);
        assert!(!inert.has_default_action());
    }

    #[test]
    fn test_separator() {
        let item = MenuItemDescriptor::separator();
        assert!(item.separator);
        assert!(!item.has_default_action());
        assert_eq!(item.display_text(), "");
    }

    #[test]
    fn test_activation_callback_runs_when_called() {
        static COUNT: AtomicUsize = AtomicUsize::new(0);

        let item = MenuItemDescriptor::new("Cut").on_activate(|| {
            COUNT.fetch_add(1, Ordering::SeqCst);
        });

        let callback = item.clicked.as_ref().expect("callback present");
        callback();
        assert_eq!(COUNT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_omits_callback_body() {
        let item = MenuItemDescriptor::new("Cut").on_activate(|| {});
        let debug = format!("{item:?}");
        assert!(debug.contains("clicked: true"));
    }
}
