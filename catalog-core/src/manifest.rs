use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TemplateEntry;
use crate::naming::{CaseStyle, NamingRule};

/// Owner applied to rows that predate ownership tagging.
pub const DEFAULT_OWNER: &str = "sameer";

/// Category label for files that sit outside any named collection.
pub const ROOT_CATEGORY: &str = "other";

/// Manifest validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Default owner must not be empty")]
    EmptyDefaultOwner,

    #[error("Group '{0}' has an empty key")]
    EmptyGroupKey(String),

    #[error("Group '{group}' lists an empty filename")]
    EmptyFilename { group: String },

    #[error("Owner for '{filename}' in group '{group}' is empty")]
    EmptyOwner { group: String, filename: String },

    #[error("Duplicate template id: {0}")]
    DuplicateId(String),
}

/// A file listed by a group, optionally tagged with its own owner.
///
/// Deserializes from either a bare string or `{ "name": .., "owner": .. }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FileSpec {
    Name(String),
    Owned {
        name: String,
        #[serde(default)]
        owner: Option<String>,
    },
}

impl FileSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Owned { name, .. } => name,
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Owned { owner, .. } => owner.as_deref(),
        }
    }
}

impl From<&str> for FileSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// A named collection of files sharing a category label and naming rule.
///
/// `path` is the directory the files are fetched from; `None` marks root-level
/// files fetched by bare filename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Prefix for entry ids (`{key}-{filename}`).
    pub key: String,
    pub category: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub naming: NamingRule,
    pub files: Vec<FileSpec>,
}

impl Group {
    pub fn content_path(&self, filename: &str) -> String {
        match self.path.as_deref().map(|p| p.trim_end_matches('/')) {
            Some(dir) if !dir.is_empty() => format!("{}/{}", dir, filename),
            _ => filename.to_string(),
        }
    }
}

/// Build the id for a file in a group. Whitespace runs become `-`.
pub fn entry_id(group_key: &str, filename: &str) -> String {
    let slug = filename.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}-{}", group_key, slug)
}

/// One flattened manifest row, ready to be fetched.
#[derive(Debug, Clone)]
pub struct ManifestRow<'a> {
    pub group: &'a Group,
    pub filename: &'a str,
    pub owner: &'a str,
    pub content_path: String,
    pub id: String,
}

impl ManifestRow<'_> {
    pub fn into_entry(self, content: String) -> TemplateEntry {
        TemplateEntry {
            name: self.group.naming.derive(self.filename),
            category: self.group.category.clone(),
            owner: self.owner.to_string(),
            id: self.id,
            content,
        }
    }
}

/// Static, validated, ordered list of groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    groups: Vec<Group>,
    default_owner: String,
}

impl Manifest {
    pub fn new(groups: Vec<Group>, default_owner: impl Into<String>) -> Result<Self, ManifestError> {
        let default_owner = default_owner.into();
        if default_owner.trim().is_empty() {
            return Err(ManifestError::EmptyDefaultOwner);
        }

        let manifest = Self {
            groups,
            default_owner,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// The collections shipped with the tool.
    pub fn builtin() -> Self {
        Self {
            groups: builtin_groups(),
            default_owner: DEFAULT_OWNER.to_string(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn default_owner(&self) -> &str {
        &self.default_owner
    }

    /// Rows in group order, then file order within each group.
    pub fn rows(&self) -> Vec<ManifestRow<'_>> {
        let default_owner = self.default_owner.as_str();
        self.groups
            .iter()
            .flat_map(|group| {
                group.files.iter().map(move |file| {
                    let filename = file.name();
                    ManifestRow {
                        group,
                        filename,
                        owner: file
                            .owner()
                            .or(group.owner.as_deref())
                            .unwrap_or(default_owner),
                        content_path: group.content_path(filename),
                        id: entry_id(&group.key, filename),
                    }
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.key.trim().is_empty() {
                return Err(ManifestError::EmptyGroupKey(group.category.clone()));
            }
        }

        for row in self.rows() {
            if row.filename.trim().is_empty() {
                return Err(ManifestError::EmptyFilename {
                    group: row.group.key.clone(),
                });
            }
            if row.owner.trim().is_empty() {
                return Err(ManifestError::EmptyOwner {
                    group: row.group.key.clone(),
                    filename: row.filename.to_string(),
                });
            }
            if !seen.insert(row.id.clone()) {
                return Err(ManifestError::DuplicateId(row.id));
            }
        }
        Ok(())
    }
}

fn files(names: &[&str]) -> Vec<FileSpec> {
    names.iter().copied().map(FileSpec::from).collect()
}

pub fn builtin_groups() -> Vec<Group> {
    vec![
        Group {
            key: "digital-india".to_string(),
            category: "digital india".to_string(),
            path: Some("digital india".to_string()),
            owner: Some("sameer".to_string()),
            naming: NamingRule::new(CaseStyle::Sentence)
                .with_extension(".html")
                .override_name("card.html", "Card Initiatives"),
            files: files(&[
                "card.html",
                "cardContainer.html",
                "footer.html",
                "hero.html",
                "leaderCard.html",
                "smallCard.html",
            ]),
        },
        Group {
            key: "hiroshima".to_string(),
            category: "hiroshima".to_string(),
            path: Some("hiroshima".to_string()),
            owner: Some("sameer".to_string()),
            naming: NamingRule::new(CaseStyle::Sentence)
                .with_extension(".html")
                .replace("Hero Section Img", "Hero Section with Image")
                .replace("Hero Section Full Img", "Full Hero Section with Image")
                .replace("Vid", "Video")
                .replace("Vid Container", "Video Container")
                .override_name("card.html", "card master minds")
                .override_name("cardContainer.html", "card container masterminds"),
            files: files(&[
                "aboveText.html",
                "animation.html",
                "card.html",
                "cardContainer.html",
                "heroSectionFullImg.html",
                "links.html",
                "simpleFooter.html",
                "story.html",
                "vid.html",
                "vidContainer.html",
            ]),
        },
        Group {
            key: "root".to_string(),
            category: ROOT_CATEGORY.to_string(),
            path: None,
            owner: Some("sameer".to_string()),
            naming: NamingRule::new(CaseStyle::Sentence)
                .replace("Md", "")
                .replace("Txt", ""),
            files: files(&["link.txt", "notes.md", "topics.md"]),
        },
        Group {
            key: "utk".to_string(),
            category: "utk templates".to_string(),
            path: Some("template/template".to_string()),
            owner: Some("utk".to_string()),
            naming: NamingRule::new(CaseStyle::Title).with_extension(".html"),
            files: files(&[
                "animations.html",
                "card.html",
                "footer.html",
                "hero section half image.html",
                "nav with bg image.html",
                "navbar.html",
            ]),
        },
    ]
}
