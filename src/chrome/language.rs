//! Language toggle. The toggle itself is pure; persistence happens at the edges.

use std::fmt;
use tracing::warn;

use crate::storage::{PreferenceStore, LANG_KEY};
use crate::view::{Element, Node};

pub const I18N_ATTR: &str = "data-i18n";
pub const LANG_BUTTON_ATTR: &str = "data-lang-btn";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Accepts short codes like `en`, `ja` or `pt-BR`; stored lowercase.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        let valid = !code.is_empty()
            && code.len() <= 16
            && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        valid.then(|| Self(code.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub lang: LanguageCode,
}

pub fn set_language(mut state: AppState, lang: LanguageCode) -> AppState {
    state.lang = lang;
    state
}

/// Hide every `data-i18n` node in another language and mark inactive language buttons.
pub fn apply_language(root: &mut Node, lang: &LanguageCode) {
    root.walk_mut(&mut |el: &mut Element| {
        if let Some(node_lang) = el.get_attr(I18N_ATTR) {
            let other = !node_lang.eq_ignore_ascii_case(lang.as_str());
            el.toggle_class("hidden", other);
        }
        if let Some(button_lang) = el.get_attr(LANG_BUTTON_ATTR) {
            let inactive = !button_lang.eq_ignore_ascii_case(lang.as_str());
            el.toggle_class("badge", inactive);
        }
    });
}

/// Read the saved language, falling back to `default` on a missing or broken store.
pub async fn load_state(store: &dyn PreferenceStore, default: &LanguageCode) -> AppState {
    let saved = match store.get(LANG_KEY).await {
        Ok(saved) => saved.as_deref().and_then(LanguageCode::parse),
        Err(e) => {
            warn!("Could not read language preference: {}", e);
            None
        }
    };
    AppState {
        lang: saved.unwrap_or_else(|| default.clone()),
    }
}

/// Toggle and persist. A failed write keeps the new in-memory state.
pub async fn change_language(
    state: AppState,
    lang: LanguageCode,
    store: &dyn PreferenceStore,
) -> AppState {
    let state = set_language(state, lang);
    if let Err(e) = store.set(LANG_KEY, state.lang.as_str()).await {
        warn!("Could not save language preference: {}", e);
    }
    state
}

/// Text that exists once per language; `apply_language` shows the right one.
pub fn localized(tag: &'static str, variants: &[(&str, &str)]) -> Vec<Node> {
    variants
        .iter()
        .map(|(lang, text)| Element::new(tag).attr(I18N_ATTR, *lang).text(*text).into())
        .collect()
}

pub fn language_switcher(languages: &[(&str, &str)]) -> Element {
    Element::new("div").class("lang-switch").children(languages.iter().map(|(code, label)| {
        Element::new("button")
            .attr("type", "button")
            .attr(LANG_BUTTON_ATTR, *code)
            .text(*label)
    }))
}
