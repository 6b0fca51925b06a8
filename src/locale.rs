use serde::{Serialize, Serializer};

use crate::language::Language;

/// The resolved locale used to pick localized text resources. Derived from
/// the current [`Language`] on demand; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLocale {
    language: Language,
}

/// Serializes as its bare tag (`"fr"`), the form text-resource lookup keys on.
impl Serialize for ActiveLocale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Localized strings used by the demo screens. One bundle per locale,
/// resolved through a total match so a missing key cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub change_language: &'static str,
    pub select_language: &'static str,
    pub profile: &'static str,
    pub username: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

/// Map a language to its active locale. Pure and total: one-to-one, no
/// fallback chains, no region variants.
pub fn derive_active_locale(language: Language) -> ActiveLocale {
    ActiveLocale { language }
}

impl ActiveLocale {
    pub fn language(self) -> Language {
        self.language
    }

    /// Locale identifier for text-resource lookup. Matches the bare
    /// language code; there are no region variants in this system.
    pub fn tag(self) -> &'static str {
        self.language.as_str()
    }

    pub fn messages(self) -> Messages {
        match self.language {
            Language::En => Messages {
                change_language: "Change Language",
                select_language: "Select language",
                profile: "Profile",
                username: "Username",
                email: "Email",
                password: "Password",
            },
            Language::Ur => Messages {
                change_language: "\u{632}\u{628}\u{627}\u{646} \u{62A}\u{628}\u{62F}\u{6CC}\u{644} \u{6A9}\u{631}\u{6CC}\u{6BA}",
                select_language: "\u{632}\u{628}\u{627}\u{646} \u{645}\u{646}\u{62A}\u{62E}\u{628} \u{6A9}\u{631}\u{6CC}\u{6BA}",
                profile: "\u{67E}\u{631}\u{648}\u{641}\u{627}\u{626}\u{644}",
                username: "\u{635}\u{627}\u{631}\u{641} \u{6A9}\u{627} \u{646}\u{627}\u{645}",
                email: "\u{627}\u{6CC} \u{645}\u{6CC}\u{644}",
                password: "\u{67E}\u{627}\u{633} \u{648}\u{631}\u{688}",
            },
            Language::Fr => Messages {
                change_language: "Changer de langue",
                select_language: "Choisir la langue",
                profile: "Profil",
                username: "Nom d'utilisateur",
                email: "E-mail",
                password: "Mot de passe",
            },
            Language::Es => Messages {
                change_language: "Cambiar idioma",
                select_language: "Seleccionar idioma",
                profile: "Perfil",
                username: "Nombre de usuario",
                email: "Correo",
                password: "Contrase\u{f1}a",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::ALL_LANGUAGES;
    use pretty_assertions::assert_eq;

    #[test]
    fn derivation_is_pure() {
        for lang in ALL_LANGUAGES {
            assert_eq!(derive_active_locale(lang), derive_active_locale(lang));
            assert_eq!(derive_active_locale(lang).language(), lang);
        }
    }

    #[test]
    fn tag_matches_language_code() {
        assert_eq!(derive_active_locale(Language::Fr).tag(), "fr");
        assert_eq!(derive_active_locale(Language::En).tag(), "en");
    }

    #[test]
    fn serializes_as_bare_tag() {
        for lang in ALL_LANGUAGES {
            let value = serde_json::to_value(derive_active_locale(lang))
                .expect("serialize active locale");
            assert_eq!(value, serde_json::Value::String(lang.as_str().to_string()));
        }
    }

    #[test]
    fn message_bundles_are_total() {
        for lang in ALL_LANGUAGES {
            let msgs = derive_active_locale(lang).messages();
            for s in [
                msgs.change_language,
                msgs.select_language,
                msgs.profile,
                msgs.username,
                msgs.email,
                msgs.password,
            ] {
                assert!(!s.is_empty(), "empty message for {lang}");
            }
        }
    }

    #[test]
    fn bundles_differ_across_locales() {
        let en = derive_active_locale(Language::En).messages();
        let fr = derive_active_locale(Language::Fr).messages();
        assert_ne!(en, fr);
    }
}
