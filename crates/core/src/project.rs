//! Project entity: the central record every admin and client surface
//! hangs off. Carries optional links to the account, proposal, brief, and
//! brand page, plus the embedded brand configuration and content blocks
//! used by the brand-page builder.

use serde::{Deserialize, Serialize};

use crate::brand::page::BrandPage;
use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Seed / demo record
// ---------------------------------------------------------------------------

/// Identifier of the permanently-present showcase project. Merge logic
/// guarantees it survives every reconciliation exactly once.
pub const DEMO_PROJECT_ID: &str = "demo-aurora";

/// Prefix marking seed/demo records. Bulk sync skips them and the merge
/// never duplicates them.
pub const DEMO_ID_PREFIX: &str = "demo-";

/// Returns `true` if the identifier names a seed/demo record.
pub fn is_demo_id(id: &EntityId) -> bool {
    id.as_str().starts_with(DEMO_ID_PREFIX)
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Review,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "planning" => Some(Self::Planning),
            "in_progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "completed" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] =
        &["planning", "in_progress", "review", "completed", "archived"];
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

/// The closed set of block kinds the brand-page builder understands.
///
/// Unknown kinds coming from newer remote records deserialize as
/// [`BlockKind::Unknown`] carrying the original tag, so re-serializing the
/// block (cache persist, update push) writes the tag back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Image,
    Gallery,
    Video,
    Quote,
    List,
    Divider,
    Button,
    Embed,
    Spacer,
    Columns,
    Logo,
    Palette,
    Typography,
    Unknown(String),
}

impl BlockKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Image => "image",
            Self::Gallery => "gallery",
            Self::Video => "video",
            Self::Quote => "quote",
            Self::List => "list",
            Self::Divider => "divider",
            Self::Button => "button",
            Self::Embed => "embed",
            Self::Spacer => "spacer",
            Self::Columns => "columns",
            Self::Logo => "logo",
            Self::Palette => "palette",
            Self::Typography => "typography",
            Self::Unknown(raw) => raw,
        }
    }

    fn parse(s: &str) -> Self {
        match s {
            "heading" => Self::Heading,
            "paragraph" => Self::Paragraph,
            "image" => Self::Image,
            "gallery" => Self::Gallery,
            "video" => Self::Video,
            "quote" => Self::Quote,
            "list" => Self::List,
            "divider" => Self::Divider,
            "button" => Self::Button,
            "embed" => Self::Embed,
            "spacer" => Self::Spacer,
            "columns" => Self::Columns,
            "logo" => Self::Logo,
            "palette" => Self::Palette,
            "typography" => Self::Typography,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Serialize for BlockKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(BlockKind::parse(&raw))
    }
}

/// One entry of a project's ordered content-block list. The `data` payload
/// is free-form JSON whose shape depends on the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: EntityId,
    pub kind: BlockKind,
    #[serde(default)]
    pub data: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Completion percentage, clamped to 0..=100.
    #[serde(default)]
    pub progress: u8,
    /// Links to related entities. Optional, and allowed to dangle: the
    /// target may have been deleted without this reference being cleaned up.
    #[serde(default)]
    pub account_id: Option<EntityId>,
    #[serde(default)]
    pub proposal_id: Option<EntityId>,
    #[serde(default)]
    pub brief_id: Option<EntityId>,
    #[serde(default)]
    pub brand_page_id: Option<EntityId>,
    /// The embedded brand configuration. Remote collection fetches may omit
    /// this (it is a heavy payload); reconciliation preserves the local copy.
    #[serde(default)]
    pub brand: Option<BrandPage>,
    /// Ordered content blocks, also omitted by narrow remote projections.
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Create a new project with default lifecycle fields.
    pub fn new(id: EntityId, title: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            client: String::new(),
            category: String::new(),
            status: ProjectStatus::Planning,
            progress: 0,
            account_id: None,
            proposal_id: None,
            brief_id: None,
            brand_page_id: None,
            brand: None,
            blocks: Vec::new(),
            published: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The permanently-present showcase project.
    pub fn demo(now: Timestamp) -> Self {
        let mut project = Self::new(
            EntityId::from(DEMO_PROJECT_ID),
            "Aurora Coffee Rebrand",
            now,
        );
        project.client = "Aurora Coffee Co.".to_string();
        project.category = "Brand Identity".to_string();
        project.status = ProjectStatus::Completed;
        project.progress = 100;
        project.published = true;
        project.brand = Some(BrandPage::demo());
        project
    }

    /// Set the completion percentage, clamping to 100.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// Change the lifecycle status, validating the string form used by the
    /// admin surface.
    pub fn set_status(&mut self, status: &str) -> Result<(), CoreError> {
        self.status = ProjectStatus::parse(status).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid project status '{status}'. Must be one of: {}",
                ProjectStatus::ALL.join(", ")
            ))
        })?;
        Ok(())
    }

    pub fn is_demo(&self) -> bool {
        is_demo_id(&self.id)
    }
}
