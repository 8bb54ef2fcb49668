//! Three-locale text bundles and their display fallback.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::TypeConstraintError;

/// Locales supported by the catalog. Arabic is the canonical source locale.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ar, Locale::En, Locale::Fr];

    /// String representation used in forms and field paths.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Locale {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            other => Err(TypeConstraintError::InvalidValue(format!("locale: {other}"))),
        }
    }
}

/// Parallel Arabic/English/French values of one text field.
///
/// Any slot may be empty. The bundle is an immutable value: edits replace it
/// wholesale instead of patching single locales.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocalizedText {
    pub ar: String,
    pub en: String,
    pub fr: String,
}

impl LocalizedText {
    /// Builds a bundle, trimming surrounding whitespace from every slot.
    pub fn new(ar: impl Into<String>, en: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            ar: ar.into().trim().to_string(),
            en: en.into().trim().to_string(),
            fr: fr.into().trim().to_string(),
        }
    }

    /// Bundle with only the canonical Arabic value set.
    pub fn arabic(ar: impl Into<String>) -> Self {
        Self::new(ar, "", "")
    }

    /// Raw value stored for `locale`, without fallback.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.ar,
            Locale::En => &self.en,
            Locale::Fr => &self.fr,
        }
    }

    /// Whether the slot for `locale` holds non-whitespace text.
    pub fn has(&self, locale: Locale) -> bool {
        !self.get(locale).trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        Locale::ALL.iter().all(|locale| !self.has(*locale))
    }

    /// Display value for `locale`, falling back `locale -> ar -> en -> fr -> ""`.
    pub fn resolve(&self, locale: Locale) -> &str {
        [locale, Locale::Ar, Locale::En, Locale::Fr]
            .into_iter()
            .find(|candidate| self.has(*candidate))
            .map(|candidate| self.get(candidate))
            .unwrap_or("")
    }

    /// Copy with empty `en`/`fr` slots filled from `ar`.
    ///
    /// Applied before a record is persisted so readers never see an empty
    /// secondary locale while Arabic is present.
    pub fn with_fallback_fill(&self) -> Self {
        let fill = |value: &str| {
            if value.trim().is_empty() {
                self.ar.clone()
            } else {
                value.to_string()
            }
        };
        Self {
            ar: self.ar.clone(),
            en: fill(&self.en),
            fr: fill(&self.fr),
        }
    }

    /// Case-insensitive substring match against every raw locale slot.
    pub fn contains_ignore_case(&self, needle_lowercase: &str) -> bool {
        Locale::ALL
            .iter()
            .any(|locale| self.get(*locale).to_lowercase().contains(needle_lowercase))
    }
}

/// Free-function form of [`LocalizedText::resolve`] returning an owned string.
pub fn resolve_display(text: &LocalizedText, locale: Locale) -> String {
    text.resolve(locale).to_string()
}
