use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a filename stem is split into words and capitalized.
///
/// - `Sentence`: a space before every capital letter, then only the leading
///   character is uppercased (`leaderCard` -> `Leader Card`).
/// - `Title`: like `Sentence`, but `-` and `.` also separate words, every word is
///   capitalized and runs of whitespace collapse (`nav-with bg` -> `Nav With Bg`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    #[default]
    Sentence,
    Title,
}

/// Literal substitution applied to the first occurrence of `from`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Per-group rule set turning a filename into a display name.
///
/// Derivation order:
/// 1. `overrides` keyed by the full filename win outright.
/// 2. Strip `extension` (or any final `.ext` when unset).
/// 3. Tokenize with `style`.
/// 4. Apply `replacements` in declared order.
/// 5. Trim. A blank result falls back to the stem, then to the filename.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamingRule {
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub style: CaseStyle,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl NamingRule {
    pub fn new(style: CaseStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Only strip this exact suffix (e.g. `".html"`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn replace(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push(Replacement::new(from, to));
        self
    }

    pub fn override_name(mut self, filename: impl Into<String>, name: impl Into<String>) -> Self {
        self.overrides.insert(filename.into(), name.into());
        self
    }

    pub fn derive(&self, filename: &str) -> String {
        if let Some(name) = self
            .overrides
            .get(filename)
            .filter(|name| !name.trim().is_empty())
        {
            return name.clone();
        }

        let stem = self.strip_extension(filename);
        let mut name = match self.style {
            CaseStyle::Sentence => sentence_case(stem),
            CaseStyle::Title => title_case(stem),
        };

        for replacement in &self.replacements {
            if !replacement.from.is_empty() {
                name = name.replacen(&replacement.from, &replacement.to, 1);
            }
        }

        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }

        tracing::debug!(filename, "Derived name is blank, falling back to filename");
        let stem = stem.trim();
        if stem.is_empty() {
            filename.to_string()
        } else {
            stem.to_string()
        }
    }

    fn strip_extension<'a>(&self, filename: &'a str) -> &'a str {
        match &self.extension {
            Some(ext) => filename.strip_suffix(ext.as_str()).unwrap_or(filename),
            None => match filename.rfind('.') {
                Some(dot) if dot + 1 < filename.len() && !filename[dot + 1..].contains('/') => {
                    &filename[..dot]
                }
                _ => filename,
            },
        }
    }
}

/// Insert a space before every uppercase character.
fn split_capitals(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len() + 4);
    for c in stem.chars() {
        if c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn sentence_case(stem: &str) -> String {
    uppercase_first(&split_capitals(stem))
}

fn title_case(stem: &str) -> String {
    let spaced: String = split_capitals(stem)
        .chars()
        .map(|c| if c == '-' || c == '.' { ' ' } else { c })
        .collect();

    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for c in spaced.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
