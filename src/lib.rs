pub mod language;
pub mod locale;
pub mod store;

pub use language::{ALL_LANGUAGES, Language, detect_system_language, parse_language};
pub use locale::{ActiveLocale, Messages, derive_active_locale};
pub use store::{PreferenceStore, StoreError, prefs_home_dir};
