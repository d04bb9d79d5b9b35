//! User-facing message catalog
//!
//! Every error string returned to API clients is produced by a [`Translator`].
//! Operator log lines never go through here; they are always English.

use serde::{Deserialize, Serialize};

/// Message keys known to the built-in [`Catalog`]
pub mod keys {
    pub const MISSING_LIMIT: &str = "pagination.missing_limit";
    pub const CONFLICTING_LIMITS: &str = "pagination.conflicting_limits";
    pub const INVALID_TYPE: &str = "pagination.invalid_type";
    pub const BELOW_MINIMUM: &str = "pagination.below_minimum";
    pub const ABOVE_MAXIMUM: &str = "pagination.above_maximum";

    pub const LOAD_AFFILIATIONS: &str = "load_failure.affiliations";
    pub const LOAD_DKIM: &str = "load_failure.dkim";
    pub const LOAD_DKIM_RESULTS: &str = "load_failure.dkim_results";
    pub const LOAD_DMARC: &str = "load_failure.dmarc";
    pub const LOAD_DMARC_SUMMARIES: &str = "load_failure.dmarc_summaries";
    pub const LOAD_DOMAINS: &str = "load_failure.domains";
    pub const LOAD_GUIDANCE_TAGS: &str = "load_failure.guidance_tags";
    pub const LOAD_HTTPS: &str = "load_failure.https";
    pub const LOAD_ORGANIZATIONS: &str = "load_failure.organizations";
    pub const LOAD_SPF: &str = "load_failure.spf";
    pub const LOAD_SSL: &str = "load_failure.ssl";
}

/// Translates a message key with named parameters into a localized string
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Supported locales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// Built-in English/French catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn template(&self, key: &str) -> Option<&'static str> {
        let template = match (self.locale, key) {
            (Locale::En, keys::MISSING_LIMIT) => {
                "You must provide a `first` or `last` value to properly paginate the \
                 `{connection}` connection."
            }
            (Locale::En, keys::CONFLICTING_LIMITS) => {
                "Passing both `first` and `last` to paginate the `{connection}` connection is not \
                 supported."
            }
            (Locale::En, keys::INVALID_TYPE) => {
                "`{argument}` must be of type `number` not `{type}`."
            }
            (Locale::En, keys::BELOW_MINIMUM) => {
                "`{argument}` on the `{connection}` connection cannot be less than zero."
            }
            (Locale::En, keys::ABOVE_MAXIMUM) => {
                "Requesting `{amount}` records on the `{connection}` connection exceeds the \
                 `{argument}` limit of {limit} records."
            }
            (Locale::En, keys::LOAD_AFFILIATIONS) => {
                "Unable to load affiliation(s). Please try again."
            }
            (Locale::En, keys::LOAD_DKIM) => "Unable to load DKIM scan(s). Please try again.",
            (Locale::En, keys::LOAD_DKIM_RESULTS) => {
                "Unable to load DKIM result(s). Please try again."
            }
            (Locale::En, keys::LOAD_DMARC) => "Unable to load DMARC scan(s). Please try again.",
            (Locale::En, keys::LOAD_DMARC_SUMMARIES) => {
                "Unable to load DMARC summary data. Please try again."
            }
            (Locale::En, keys::LOAD_DOMAINS) => "Unable to load domain(s). Please try again.",
            (Locale::En, keys::LOAD_GUIDANCE_TAGS) => {
                "Unable to load guidance tag(s). Please try again."
            }
            (Locale::En, keys::LOAD_HTTPS) => "Unable to load HTTPS scan(s). Please try again.",
            (Locale::En, keys::LOAD_ORGANIZATIONS) => {
                "Unable to load organization(s). Please try again."
            }
            (Locale::En, keys::LOAD_SPF) => "Unable to load SPF scan(s). Please try again.",
            (Locale::En, keys::LOAD_SSL) => "Unable to load SSL scan(s). Please try again.",

            (Locale::Fr, keys::MISSING_LIMIT) => {
                "Vous devez fournir une valeur `first` ou `last` pour paginer correctement la \
                 connexion `{connection}`."
            }
            (Locale::Fr, keys::CONFLICTING_LIMITS) => {
                "Passer à la fois `first` et `last` pour paginer la connexion `{connection}` \
                 n'est pas supporté."
            }
            (Locale::Fr, keys::INVALID_TYPE) => {
                "`{argument}` doit être de type `number` et non `{type}`."
            }
            (Locale::Fr, keys::BELOW_MINIMUM) => {
                "`{argument}` sur la connexion `{connection}` ne peut être inférieur à zéro."
            }
            (Locale::Fr, keys::ABOVE_MAXIMUM) => {
                "La demande d'enregistrements `{amount}` sur la connexion `{connection}` dépasse \
                 la limite `{argument}` de {limit} enregistrements."
            }
            (Locale::Fr, keys::LOAD_AFFILIATIONS) => {
                "Impossible de charger l'affiliation (s). Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_DKIM) => {
                "Impossible de charger le(s) scan(s) DKIM. Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_DKIM_RESULTS) => {
                "Impossible de charger le(s) résultat(s) DKIM. Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_DMARC) => {
                "Impossible de charger le(s) scan(s) DMARC. Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_DMARC_SUMMARIES) => {
                "Impossible de charger les données de synthèse DMARC. Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_DOMAINS) => {
                "Impossible de charger le(s) domaine(s). Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_GUIDANCE_TAGS) => {
                "Impossible de charger la ou les balises d'orientation. Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_HTTPS) => {
                "Impossible de charger le(s) scan(s) HTTPS. Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_ORGANIZATIONS) => {
                "Impossible de charger l'organisation (s). Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_SPF) => {
                "Impossible de charger le(s) scan(s) SPF. Veuillez réessayer."
            }
            (Locale::Fr, keys::LOAD_SSL) => {
                "Impossible de charger le(s) scan(s) SSL. Veuillez réessayer."
            }

            _ => return None,
        };
        Some(template)
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.template(key) else {
            return key.to_string();
        };

        params
            .iter()
            .fold(template.to_string(), |message, (name, value)| {
                message.replace(&format!("{{{name}}}"), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_substitution() {
        let catalog = Catalog::new(Locale::En);
        let message = catalog.translate(
            keys::ABOVE_MAXIMUM,
            &[
                ("amount", "101"),
                ("connection", "Domain"),
                ("argument", "first"),
                ("limit", "100"),
            ],
        );
        assert_eq!(
            message,
            "Requesting `101` records on the `Domain` connection exceeds the `first` limit of 100 \
             records."
        );
    }

    #[test]
    fn test_french_catalog() {
        let catalog = Catalog::new(Locale::Fr);
        assert_eq!(
            catalog.translate(keys::LOAD_DOMAINS, &[]),
            "Impossible de charger le(s) domaine(s). Veuillez réessayer."
        );
    }

    #[test]
    fn test_unknown_key_echoes_key() {
        let catalog = Catalog::default();
        assert_eq!(catalog.translate("no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn test_every_key_has_both_locales() {
        let all = [
            keys::MISSING_LIMIT,
            keys::CONFLICTING_LIMITS,
            keys::INVALID_TYPE,
            keys::BELOW_MINIMUM,
            keys::ABOVE_MAXIMUM,
            keys::LOAD_AFFILIATIONS,
            keys::LOAD_DKIM,
            keys::LOAD_DKIM_RESULTS,
            keys::LOAD_DMARC,
            keys::LOAD_DMARC_SUMMARIES,
            keys::LOAD_DOMAINS,
            keys::LOAD_GUIDANCE_TAGS,
            keys::LOAD_HTTPS,
            keys::LOAD_ORGANIZATIONS,
            keys::LOAD_SPF,
            keys::LOAD_SSL,
        ];
        for locale in [Locale::En, Locale::Fr] {
            let catalog = Catalog::new(locale);
            for key in all {
                assert!(catalog.template(key).is_some(), "{key} missing for {locale:?}");
            }
        }
    }

    #[test]
    fn test_locale_deserializes_lowercase() {
        let locale: Locale = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(locale, Locale::Fr);
    }
}
