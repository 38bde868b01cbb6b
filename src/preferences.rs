use crate::document::{Page, MODE_ATTRIBUTE, THEME_ATTRIBUTE};
use crate::errors::AppError;
use crate::models::Mode;
use crate::storage::PreferenceStore;
use tracing::debug;

pub const MODE_KEY: &str = "mode";
pub const THEME_KEY: &str = "theme";
pub const DEFAULT_THEME: &str = "default";

pub const ICON_DARK: &str = "bi bi-sun-fill";
pub const ICON_LIGHT: &str = "bi bi-moon-stars-fill";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub mode: Mode,
    pub theme: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            mode: Mode::Dark,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Preferences {
    /// Reads both keys, falling back to the defaults for anything absent or
    /// empty. A stored mode that is neither `light` nor `dark` counts as
    /// absent.
    pub fn load<S: PreferenceStore>(store: &S) -> Self {
        let mode = store
            .get(MODE_KEY)
            .filter(|value| !value.is_empty())
            .and_then(|value| Mode::parse(&value))
            .unwrap_or_default();
        let theme = store
            .get(THEME_KEY)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME.to_string());
        Self { mode, theme }
    }
}

pub fn apply_mode(page: &mut Page, mode: Mode) {
    page.set_root_attribute(MODE_ATTRIBUTE, mode.as_str());
    page.mode_switch_checked = mode == Mode::Dark;
    page.mode_icon_class = match mode {
        Mode::Dark => ICON_DARK,
        Mode::Light => ICON_LIGHT,
    }
    .to_string();
}

pub fn apply_theme(page: &mut Page, theme: &str) {
    page.set_root_attribute(THEME_ATTRIBUTE, theme);
}

/// Projects the whole preference set onto the page.
pub fn apply(page: &mut Page, prefs: &Preferences) {
    apply_mode(page, prefs.mode);
    page.theme_select_value = prefs.theme.clone();
    apply_theme(page, &prefs.theme);
}

pub fn init<S: PreferenceStore>(store: &S, page: &mut Page) -> Preferences {
    let prefs = Preferences::load(store);
    apply(page, &prefs);
    prefs
}

/// Persists the toggle's new mode, then reflects it. A failed write leaves
/// the page as it was.
pub async fn on_mode_toggle<S: PreferenceStore>(
    store: &mut S,
    page: &mut Page,
    checked: bool,
) -> Result<Mode, AppError> {
    let mode = Mode::from_checked(checked);
    store.set(MODE_KEY, mode.as_str()).await?;
    debug!(%mode, "mode changed");
    apply_mode(page, mode);
    Ok(mode)
}

pub async fn on_theme_change<S: PreferenceStore>(
    store: &mut S,
    page: &mut Page,
    theme: &str,
) -> Result<(), AppError> {
    store.set(THEME_KEY, theme).await?;
    debug!(theme, "theme changed");
    page.theme_select_value = theme.to_string();
    apply_theme(page, theme);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn assert_consistent(page: &Page, mode: Mode) {
        assert_eq!(page.root_attribute(MODE_ATTRIBUTE), Some(mode.as_str()));
        assert_eq!(page.mode_switch_checked, mode == Mode::Dark);
        let icon = if mode == Mode::Dark { ICON_DARK } else { ICON_LIGHT };
        assert_eq!(page.mode_icon_class, icon);
    }

    #[test]
    fn apply_mode_keeps_attribute_toggle_and_icon_in_step() {
        for mode in [Mode::Light, Mode::Dark] {
            let mut page = Page::new();
            apply_mode(&mut page, mode);
            assert_consistent(&page, mode);
        }
    }

    #[test]
    fn apply_theme_takes_any_string() {
        let mut page = Page::new();
        apply_theme(&mut page, "not a real theme <3");
        assert_eq!(
            page.root_attribute(THEME_ATTRIBUTE),
            Some("not a real theme <3")
        );
    }

    #[test]
    fn init_with_empty_store_uses_defaults() {
        let store = MemoryStore::new();
        let mut page = Page::new();
        let prefs = init(&store, &mut page);

        assert_eq!(prefs, Preferences::default());
        assert_consistent(&page, Mode::Dark);
        assert_eq!(page.root_attribute(THEME_ATTRIBUTE), Some("default"));
        assert_eq!(page.theme_select_value, "default");
    }

    #[tokio::test]
    async fn init_ignores_unknown_mode() {
        let mut store = MemoryStore::new();
        store.set(MODE_KEY, "sepia").await.unwrap();
        let mut page = Page::new();
        let prefs = init(&store, &mut page);
        assert_eq!(prefs.mode, Mode::Dark);
    }

    #[tokio::test]
    async fn empty_stored_values_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        let mut page = Page::new();
        store.set(MODE_KEY, "").await.unwrap();
        on_theme_change(&mut store, &mut page, "").await.unwrap();

        let mut fresh = Page::new();
        let prefs = init(&store, &mut fresh);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(fresh.root_attribute(THEME_ATTRIBUTE), Some("default"));
        assert_eq!(fresh.theme_select_value, "default");
        assert_consistent(&fresh, Mode::Dark);
    }

    #[tokio::test]
    async fn changes_survive_reinitialization() {
        let mut store = MemoryStore::new();
        let mut page = Page::new();
        init(&store, &mut page);

        let mode = on_mode_toggle(&mut store, &mut page, false).await.unwrap();
        assert_eq!(mode, Mode::Light);
        on_theme_change(&mut store, &mut page, "forest").await.unwrap();
        assert_consistent(&page, Mode::Light);

        let mut fresh = Page::new();
        let prefs = init(&store, &mut fresh);
        assert_eq!(prefs.mode, Mode::Light);
        assert_eq!(prefs.theme, "forest");
        assert_eq!(fresh.root_attributes, page.root_attributes);
        assert_eq!(fresh.theme_select_value, "forest");
        assert_consistent(&fresh, Mode::Light);
    }

    #[tokio::test]
    async fn page_matches_store_after_each_change() {
        let mut store = MemoryStore::new();
        let mut page = Page::new();
        init(&store, &mut page);

        for checked in [true, false, true] {
            on_mode_toggle(&mut store, &mut page, checked).await.unwrap();
            assert_eq!(
                page.root_attribute(MODE_ATTRIBUTE).map(str::to_string),
                store.get(MODE_KEY)
            );
        }
    }
}
