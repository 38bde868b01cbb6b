//! In-memory model of the page's element surface.
//!
//! Handlers mutate a [`Page`] and [`crate::ui::render_page`] turns it into
//! HTML, so what the browser receives is exactly what the model holds.

use std::collections::BTreeMap;

pub const MODE_ATTRIBUTE: &str = "data-bs-theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    None,
    Flex,
    Block,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Flex => "flex",
            Display::Block => "block",
        }
    }
}

/// Content of a result slot. `Text` is escaped on render, `Markup` is
/// trusted and emitted as is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Empty,
    Text(String),
    Markup(String),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        match self {
            Slot::Empty => true,
            Slot::Text(text) | Slot::Markup(text) => text.is_empty(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Slot::Empty => false,
            Slot::Text(text) | Slot::Markup(text) => text.contains(needle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPanel {
    pub display: Display,
    pub drinks_to_target: Slot,
    pub time_to_sober: Slot,
}

impl ResultPanel {
    pub fn is_visible(&self) -> bool {
        self.display != Display::None
    }
}

/// Values the BAC form is re-rendered with after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEcho {
    pub weight: String,
    pub weight_unit: String,
    pub gender: Option<String>,
    pub current_drinks: String,
}

impl Default for FormEcho {
    fn default() -> Self {
        Self {
            weight: String::new(),
            weight_unit: "kg".to_string(),
            gender: None,
            current_drinks: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub root_attributes: BTreeMap<String, String>,
    pub mode_switch_checked: bool,
    pub mode_icon_class: String,
    pub theme_select_value: String,
    pub form: FormEcho,
    pub result: ResultPanel,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }
}
