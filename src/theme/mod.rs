use crate::storage::{load_item, save_item, THEME_KEY};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Missing or unknown stored values fall back to light.
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| Theme::from_str(v.trim()).ok())
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph for the toggle button: offers the other mode.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

pub(crate) fn load_theme() -> Theme {
    Theme::from_stored(load_item(THEME_KEY).as_deref())
}

pub(crate) fn save_theme(theme: Theme) {
    save_item(THEME_KEY, theme.as_str());
}

/// Dark mode is `data-theme="dark"` on `<body>`; light mode removes the attribute.
pub(crate) fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };

    match theme {
        Theme::Dark => {
            let _ = body.set_attribute("data-theme", "dark");
        }
        Theme::Light => {
            let _ = body.remove_attribute("data-theme");
        }
    }
}
