use owo_colors::OwoColorize;
use serde::Serialize;

use lang_prefs::{
    ALL_LANGUAGES, ActiveLocale, Language, PreferenceStore, derive_active_locale,
    detect_system_language, parse_language,
};

use crate::{CliError, CliResult};

#[derive(Debug, Serialize)]
struct GetReport {
    language: Language,
    locale: ActiveLocale,
    saved: bool,
}

pub async fn handle_get(json: bool) -> CliResult<()> {
    let store = PreferenceStore::open_default();
    let saved = store.saved_language().await?;
    let language = saved.unwrap_or_default();
    let locale = derive_active_locale(language);

    if json {
        let report = GetReport {
            language,
            locale,
            saved: saved.is_some(),
        };
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Other(e.to_string()))?;
        println!("{}", body);
        return Ok(());
    }

    if saved.is_some() {
        println!("Active language: {} ({})", language.bold(), language.label());
    } else {
        println!(
            "Active language: {} ({}), no saved preference, using the default",
            language.bold(),
            language.label()
        );
        let hint = detect_system_language();
        if hint != language {
            println!(
                "Your system locale looks like {} ({}); run `lang-prefs set {}` to switch",
                hint,
                hint.label(),
                hint
            );
        }
    }
    Ok(())
}

pub async fn handle_set(raw: &str) -> CliResult<()> {
    let Some(language) = parse_language(raw) else {
        let codes = ALL_LANGUAGES
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CliError::Input(format!(
            "Unknown language {raw:?}; supported codes: {codes}"
        )));
    };

    let store = PreferenceStore::open_default();
    store.set_language(language).await?;
    println!("Language set to {} ({})", language.bold(), language.label());
    Ok(())
}

pub async fn handle_list() -> CliResult<()> {
    let store = PreferenceStore::open_default();
    let active = store.resolve_language().await?;

    println!("Supported languages (from {:?}):", store.settings_file_path());
    for lang in ALL_LANGUAGES {
        let marker = if lang == active { "*" } else { " " };
        println!("  {} {}  {}", marker, lang.as_str(), lang.label());
    }
    Ok(())
}

/// Stand-in for the original demo's profile screen: resolve the language,
/// derive the locale, render once with that bundle.
pub async fn handle_show() -> CliResult<()> {
    let store = PreferenceStore::open_default();
    let language = store.resolve_language().await?;
    let msgs = derive_active_locale(language).messages();

    println!("{}", msgs.select_language.bold());
    println!("  {}", language.label());
    println!();
    println!("{}", msgs.profile.bold());
    println!("  {}: Ali Khan", msgs.username);
    println!("  {}: ali@example.com", msgs.email);
    println!("  {}: ********", msgs.password);
    Ok(())
}

pub async fn handle_reset() -> CliResult<()> {
    let store = PreferenceStore::open_default();
    store.reset().await?;
    println!(
        "Saved preference cleared; active language is now {}",
        Language::default().bold()
    );
    Ok(())
}

pub fn handle_path() {
    let store = PreferenceStore::open_default();
    println!("{}", store.settings_file_path().display());
}
