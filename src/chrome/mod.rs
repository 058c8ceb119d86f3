pub mod language;
pub mod widgets;

pub use language::{apply_language, change_language, load_state, set_language, AppState, LanguageCode};
pub use widgets::Disclosure;
