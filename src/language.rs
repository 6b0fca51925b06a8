use serde::{Deserialize, Serialize};

/// A display language supported by the app. Closed set; anything else is
/// invalid and must be rejected at the string boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ur,
    Fr,
    Es,
}

/// All supported languages, in menu order.
pub const ALL_LANGUAGES: [Language; 4] = [Language::En, Language::Ur, Language::Fr, Language::Es];

impl Language {
    /// Canonical short code, the form persisted on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ur => "ur",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }

    /// Strict parse of a canonical code. This is the validation boundary for
    /// persisted values: only the exact canonical forms are accepted.
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "ur" => Some(Language::Ur),
            "fr" => Some(Language::Fr),
            "es" => Some(Language::Es),
            _ => None,
        }
    }

    /// Native display label for selection menus. Presentation metadata,
    /// not part of the persisted contract.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English \u{1F1FA}\u{1F1F8}",
            Language::Ur => "\u{627}\u{631}\u{62F}\u{648} \u{1F1F5}\u{1F1F0}",
            Language::Fr => "Fran\u{e7}ais \u{1F1EB}\u{1F1F7}",
            Language::Es => "Espa\u{f1}ol \u{1F1EA}\u{1F1F8}",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for user input (CLI arguments). Accepts common aliases and
/// region-tagged forms; the persisted form stays canonical.
pub fn parse_language(s: &str) -> Option<Language> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }
    match s.as_str() {
        "en" | "en-us" | "en_us" | "en-gb" | "english" => Some(Language::En),
        "ur" | "ur-pk" | "ur_pk" | "urdu" | "اردو" => Some(Language::Ur),
        "fr" | "fr-fr" | "fr_fr" | "french" | "français" | "francais" => Some(Language::Fr),
        "es" | "es-es" | "es_es" | "es-mx" | "spanish" | "español" | "espanol" => {
            Some(Language::Es)
        }
        _ => None,
    }
}

/// Best-effort system language detection from locale env vars.
///
/// Common values:
/// - LANG=fr_FR.UTF-8
/// - LC_ALL=es_ES.UTF-8
/// - LANGUAGE=ur_PK:en_US
///
/// This is only a hint for presentation layers on first run; the store's
/// own default is always `en`.
pub fn detect_system_language() -> Language {
    for key in ["LC_ALL", "LC_MESSAGES", "LANGUAGE", "LANG"] {
        if let Ok(v) = std::env::var(key) {
            let v = v.trim().to_ascii_lowercase();
            if v.starts_with("ur") {
                return Language::Ur;
            }
            if v.starts_with("fr") {
                return Language::Fr;
            }
            if v.starts_with("es") {
                return Language::Es;
            }
            if v.starts_with("en") {
                return Language::En;
            }
        }
    }
    Language::En
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(g) => g,
            Err(e) => e.into_inner(),
        }
    }

    struct ScopedEnv {
        saved: Vec<(String, Option<String>)>,
    }

    impl ScopedEnv {
        fn new() -> Self {
            Self { saved: Vec::new() }
        }

        unsafe fn set(&mut self, key: &str, value: &str) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
            unsafe { std::env::set_var(key, value) };
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, old) in self.saved.drain(..).rev() {
                unsafe {
                    match old {
                        Some(v) => std::env::set_var(&key, v),
                        None => std::env::remove_var(&key),
                    }
                }
            }
        }
    }

    #[test]
    fn canonical_codes_round_trip() {
        for lang in ALL_LANGUAGES {
            assert_eq!(Language::from_code(lang.as_str()), Some(lang));
        }
    }

    #[test]
    fn strict_parse_rejects_everything_else() {
        for raw in ["de", "", " en", "EN", "en-US", "xx", "english"] {
            assert_eq!(Language::from_code(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn lenient_parse_accepts_aliases() {
        assert_eq!(parse_language("  English "), Some(Language::En));
        assert_eq!(parse_language("fr_FR"), Some(Language::Fr));
        assert_eq!(parse_language("Español"), Some(Language::Es));
        assert_eq!(parse_language("urdu"), Some(Language::Ur));
        assert_eq!(parse_language("klingon"), None);
        assert_eq!(parse_language(""), None);
    }

    #[test]
    fn labels_are_total_and_distinct() {
        let labels: Vec<&str> = ALL_LANGUAGES.iter().map(|l| l.label()).collect();
        for label in &labels {
            assert!(!label.is_empty());
        }
        let mut dedup = labels.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), labels.len());
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn detection_probes_lc_all_first() {
        let _lock = env_lock();
        let mut env = ScopedEnv::new();
        unsafe {
            env.set("LC_ALL", "");
            env.set("LC_MESSAGES", "");
            env.set("LANGUAGE", "");
            env.set("LANG", "");
        }
        assert_eq!(detect_system_language(), Language::En);

        unsafe { env.set("LANG", "fr_FR.UTF-8") };
        assert_eq!(detect_system_language(), Language::Fr);

        unsafe { env.set("LANGUAGE", "ur_PK:en_US") };
        assert_eq!(detect_system_language(), Language::Ur);

        unsafe { env.set("LC_MESSAGES", "es_ES.UTF-8") };
        assert_eq!(detect_system_language(), Language::Es);

        unsafe { env.set("LC_ALL", "en_US.UTF-8") };
        assert_eq!(detect_system_language(), Language::En);
    }

    #[test]
    fn detection_falls_back_to_english_for_unknown_locales() {
        let _lock = env_lock();
        let mut env = ScopedEnv::new();
        unsafe {
            env.set("LC_ALL", "de_DE.UTF-8");
            env.set("LC_MESSAGES", "");
            env.set("LANGUAGE", "");
            env.set("LANG", "");
        }
        assert_eq!(detect_system_language(), Language::En);
    }
}
