//! Localization for all user-facing bot messages.
//!
//! Messages live in Fluent resources under `locales/<lang>/main.ftl`.
//! Russian is the primary deployment language; English is kept in sync and
//! unsupported Telegram language codes fall back to Russian.

use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use unic_langid::LanguageIdentifier;

const SUPPORTED_LANGUAGES: &[&str] = &["ru", "en"];
const FALLBACK_LANGUAGE: &str = "ru";

pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for lang in SUPPORTED_LANGUAGES {
            let locale: LanguageIdentifier = lang.parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert((*lang).to_string(), Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        // The concurrent bundle variant carries a thread-safe memoizer, which
        // the global `OnceLock` needs (`Sync`).
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // No Unicode isolation marks around placeables; messages go straight
        // into plain-text Telegram messages.
        bundle.set_use_isolating(false);

        let resource_path = format!("./locales/{}/main.ftl", locale);
        let content = fs::read_to_string(&resource_path)?;
        let resource = FluentResource::try_new(content).map_err(|(_, errors)| {
            anyhow::anyhow!("invalid fluent resource {resource_path}: {errors:?}")
        })?;
        bundle.add_resource(resource).map_err(|errors| {
            anyhow::anyhow!("conflicting fluent messages in {resource_path}: {errors:?}")
        })?;

        Ok(bundle)
    }

    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.bundles.contains_key(lang)
    }

    /// Get a localized message in the given language, falling back to the
    /// default language for unsupported codes.
    pub fn get_message_in_language(
        &self,
        key: &str,
        lang: &str,
        args: Option<&[(&str, &str)]>,
    ) -> String {
        let bundle = self
            .bundles
            .get(lang)
            .or_else(|| self.bundles.get(FALLBACK_LANGUAGE))
            .expect("fallback language bundle must exist");

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();
        let mut errors = vec![];

        if let Some(args) = args {
            let fluent_args =
                FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));
            let _ = bundle.write_pattern(&mut value, pattern, Some(&fluent_args), &mut errors);
        } else {
            let _ = bundle.write_pattern(&mut value, pattern, None, &mut errors);
        }

        value
    }
}

/// Global localization instance, initialised once at startup.
static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager. Safe to call more than once.
pub fn init_localization() -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_some() {
        return Ok(());
    }
    let manager = LocalizationManager::new()?;
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER
        .get()
        .expect("Localization manager not initialized")
}

/// Map a Telegram language code onto a supported bundle language.
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let code = match language_code {
        Some(code) => code,
        None => return FALLBACK_LANGUAGE,
    };
    let primary = code.split(['-', '_']).next().unwrap_or(code);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| **lang == primary)
        .copied()
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// Get a localized message for the given Telegram language code.
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    get_localization_manager().get_message_in_language(key, detect_language(language_code), None)
}

/// Get a localized message with arguments for the given language code.
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    get_localization_manager().get_message_in_language(
        key,
        detect_language(language_code),
        Some(args),
    )
}
