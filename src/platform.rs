use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{OptimizeError, Result};

pub const GENERAL: &str = "General";

/// Structural constraints a post has to satisfy on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRules {
    pub key: String,
    pub max_chars: usize,
    pub min_chars: usize,
    pub hashtags_min: usize,
    pub hashtags_max: usize,
    pub emojis_max: usize,
    pub allow_line_breaks: bool,
    pub default_cta: String,
    pub cta_variants: Vec<String>,
    pub fallback_hashtag: String,
}

impl PlatformRules {
    pub fn primary_cta(&self) -> &str {
        self.cta_variants
            .first()
            .map(String::as_str)
            .unwrap_or(self.default_cta.as_str())
    }

    pub fn cta_separator(&self) -> &'static str {
        if self.allow_line_breaks {
            "\n"
        } else {
            " — "
        }
    }

    pub fn length_in_window(&self, length: usize) -> bool {
        length >= self.min_chars && length <= self.max_chars
    }

    pub fn validate(&self) -> Result<()> {
        if self.hashtags_min > self.hashtags_max {
            return Err(OptimizeError::Config(format!(
                "{}: hashtags_min ({}) exceeds hashtags_max ({})",
                self.key, self.hashtags_min, self.hashtags_max
            )));
        }
        if self.min_chars > self.max_chars {
            return Err(OptimizeError::Config(format!(
                "{}: min_chars ({}) exceeds max_chars ({})",
                self.key, self.min_chars, self.max_chars
            )));
        }
        if self.cta_variants.iter().all(|variant| variant.trim().is_empty()) {
            return Err(OptimizeError::Config(format!(
                "{}: at least one CTA variant is required",
                self.key
            )));
        }
        Ok(())
    }
}

/// Partial rule set read from `[platforms.<Name>]` in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags_min: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags_max: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emojis_max: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_line_breaks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_variants: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_hashtag: Option<String>,
}

impl PlatformOverride {
    fn apply(&self, rules: &mut PlatformRules) {
        if let Some(value) = self.max_chars {
            rules.max_chars = value;
        }
        if let Some(value) = self.min_chars {
            rules.min_chars = value;
        }
        if let Some(value) = self.hashtags_min {
            rules.hashtags_min = value;
        }
        if let Some(value) = self.hashtags_max {
            rules.hashtags_max = value;
        }
        if let Some(value) = self.emojis_max {
            rules.emojis_max = value;
        }
        if let Some(value) = self.allow_line_breaks {
            rules.allow_line_breaks = value;
        }
        if let Some(value) = self.default_cta.as_ref() {
            rules.default_cta = value.clone();
        }
        if let Some(value) = self.cta_variants.as_ref() {
            rules.cta_variants = value.clone();
        }
        if let Some(value) = self.fallback_hashtag.as_ref() {
            rules.fallback_hashtag = value.clone();
        }
    }
}

/// Immutable table of platform rules, keyed by canonical platform name.
#[derive(Debug, Clone)]
pub struct PlatformCatalog {
    rules: BTreeMap<String, PlatformRules>,
    aliases: BTreeMap<String, String>,
}

impl Default for PlatformCatalog {
    fn default() -> Self {
        let entries = [
            builtin("Twitter", 280, 60, (0, 2), 1, false, "Learn more", &["Learn more", "Read more", "Try now"], "#Trending"),
            builtin("LinkedIn", 300, 120, (0, 3), 1, true, "Learn more", &["Learn more", "Get the full story", "See how it works"], "#Insights"),
            builtin("Instagram", 220, 80, (1, 3), 3, true, "Tap to explore", &["Tap to explore", "Shop now", "Try it today"], "#InstaDaily"),
            builtin("TikTok", 150, 50, (1, 3), 3, true, "Watch now", &["Watch now", "Try it now", "See the results"], "#ForYou"),
            builtin("YouTube", 150, 60, (0, 2), 2, true, "Subscribe for more", &["Subscribe for more", "Watch now", "Learn more"], "#YouTube"),
            builtin(GENERAL, 160, 60, (0, 3), 2, true, "Learn more", &["Learn more", "Try now", "Get started"], "#Updates"),
        ];

        let rules = entries
            .into_iter()
            .map(|rules| (rules.key.clone(), rules))
            .collect();
        let mut aliases = BTreeMap::new();
        aliases.insert("X".to_string(), "Twitter".to_string());

        Self { rules, aliases }
    }
}

impl PlatformCatalog {
    /// Builds the default catalog with config overrides applied on top.
    /// Unknown names become new platforms seeded from `General`.
    pub fn with_overrides(overrides: &BTreeMap<String, PlatformOverride>) -> Result<Self> {
        let mut catalog = Self::default();
        for (name, patch) in overrides {
            let canonical = catalog
                .aliases
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.clone());
            let mut rules = match catalog.rules.get(&canonical) {
                Some(existing) => existing.clone(),
                None => {
                    let mut seeded = catalog.general().clone();
                    seeded.key = canonical.clone();
                    seeded
                }
            };
            patch.apply(&mut rules);
            rules.validate()?;
            catalog.rules.insert(canonical, rules);
        }
        Ok(catalog)
    }

    /// Exact, case-sensitive lookup; aliases map onto their canonical entry
    /// and anything unmatched falls back to `General`.
    pub fn resolve(&self, platform: &str) -> &PlatformRules {
        let canonical = self
            .aliases
            .get(platform)
            .map(String::as_str)
            .unwrap_or(platform);
        self.rules.get(canonical).unwrap_or_else(|| self.general())
    }

    pub fn general(&self) -> &PlatformRules {
        match self.rules.get(GENERAL) {
            Some(rules) => rules,
            None => &DEFAULT_CATALOG.rules[GENERAL],
        }
    }

    pub fn platforms(&self) -> impl Iterator<Item = &PlatformRules> {
        self.rules.values()
    }
}

static DEFAULT_CATALOG: LazyLock<PlatformCatalog> = LazyLock::new(PlatformCatalog::default);

pub fn default_catalog() -> &'static PlatformCatalog {
    &DEFAULT_CATALOG
}

pub fn resolve_platform(platform: &str) -> &'static PlatformRules {
    DEFAULT_CATALOG.resolve(platform)
}

#[allow(clippy::too_many_arguments)]
fn builtin(
    key: &str,
    max_chars: usize,
    min_chars: usize,
    hashtags: (usize, usize),
    emojis_max: usize,
    allow_line_breaks: bool,
    default_cta: &str,
    cta_variants: &[&str],
    fallback_hashtag: &str,
) -> PlatformRules {
    PlatformRules {
        key: key.to_string(),
        max_chars,
        min_chars,
        hashtags_min: hashtags.0,
        hashtags_max: hashtags.1,
        emojis_max,
        allow_line_breaks,
        default_cta: default_cta.to_string(),
        cta_variants: cta_variants.iter().map(|variant| variant.to_string()).collect(),
        fallback_hashtag: fallback_hashtag.to_string(),
    }
}
