//! The brand-page content model.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Template identifiers
// ---------------------------------------------------------------------------

/// The closed set of visual templates a brand page can render with.
///
/// Deserialization is lenient: an unknown or missing identifier falls back
/// to the designated default so a stale snapshot can never make a page
/// unrenderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    #[default]
    Minimal,
    Editorial,
    Monochrome,
    Vibrant,
    Brutalist,
    /// The only template that renders the social-media strategy section.
    Campaign,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Editorial => "editorial",
            Self::Monochrome => "monochrome",
            Self::Vibrant => "vibrant",
            Self::Brutalist => "brutalist",
            Self::Campaign => "campaign",
        }
    }

    /// Parse a template identifier. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "minimal" => Some(Self::Minimal),
            "editorial" => Some(Self::Editorial),
            "monochrome" => Some(Self::Monochrome),
            "vibrant" => Some(Self::Vibrant),
            "brutalist" => Some(Self::Brutalist),
            "campaign" => Some(Self::Campaign),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] = &[
        "minimal",
        "editorial",
        "monochrome",
        "vibrant",
        "brutalist",
        "campaign",
    ];
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(TemplateId::parse(&raw).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// The sections a brand page is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hero,
    Logos,
    Palette,
    Typography,
    Story,
    Mockups,
    Social,
    Footer,
}

/// Per-section enable flags. Every section defaults to enabled; a disabled
/// section is omitted from rendering entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionToggles {
    #[serde(default = "enabled")]
    pub hero: bool,
    #[serde(default = "enabled")]
    pub logos: bool,
    #[serde(default = "enabled")]
    pub palette: bool,
    #[serde(default = "enabled")]
    pub typography: bool,
    #[serde(default = "enabled")]
    pub story: bool,
    #[serde(default = "enabled")]
    pub mockups: bool,
    #[serde(default = "enabled")]
    pub social: bool,
    #[serde(default = "enabled")]
    pub footer: bool,
}

fn enabled() -> bool {
    true
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            hero: true,
            logos: true,
            palette: true,
            typography: true,
            story: true,
            mockups: true,
            social: true,
            footer: true,
        }
    }
}

impl SectionToggles {
    pub fn is_enabled(&self, section: Section) -> bool {
        match section {
            Section::Hero => self.hero,
            Section::Logos => self.logos,
            Section::Palette => self.palette,
            Section::Typography => self.typography,
            Section::Story => self.story,
            Section::Mockups => self.mockups,
            Section::Social => self.social,
            Section::Footer => self.footer,
        }
    }
}

/// Free-text overrides for a section's heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SectionText {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

// ---------------------------------------------------------------------------
// Visual identity pieces
// ---------------------------------------------------------------------------

/// The logo variants a brand page can showcase. All optional; a variant
/// without an uploaded asset is simply not shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogoSet {
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub dark: Option<String>,
    #[serde(default)]
    pub icon_light: Option<String>,
    #[serde(default)]
    pub icon_dark: Option<String>,
    #[serde(default)]
    pub grid: Option<String>,
    #[serde(default)]
    pub anatomy: Option<String>,
}

/// A font selection: the family name plus an optional uploaded font file.
/// Both are user-supplied and pass through sanitization before they reach
/// generated style text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FontChoice {
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// One palette entry. The rgb form is derived from the hex value, never
/// stored separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub hex: String,
}

impl PaletteColor {
    /// Parse the hex value into rgb components. Accepts `#RGB` and
    /// `#RRGGBB`, with or without the leading hash.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.hex.trim().trim_start_matches('#');
        // Length is in bytes; slicing below needs ascii-only input.
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let mut chars = hex.chars();
                let r = chars.next()?.to_digit(16)? as u8;
                let g = chars.next()?.to_digit(16)? as u8;
                let b = chars.next()?.to_digit(16)? as u8;
                Some((r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some((r, g, b))
            }
            _ => None,
        }
    }

    /// CSS `rgb(...)` form of the color, when the hex value parses.
    pub fn rgb_css(&self) -> Option<String> {
        self.rgb().map(|(r, g, b)| format!("rgb({r}, {g}, {b})"))
    }
}

// ---------------------------------------------------------------------------
// Social strategy (campaign template extension)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentPillar {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlatformPlan {
    pub platform: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HashtagGroup {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalendarSlot {
    pub day: String,
    #[serde(default)]
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct KpiTarget {
    pub metric: String,
    #[serde(default)]
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Persona {
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

/// The social-media strategy sub-document. Template-specific: only the
/// campaign template renders it, but it travels with the page so core
/// entity logic never special-cases template shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SocialStrategy {
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub pillars: Vec<ContentPillar>,
    #[serde(default)]
    pub platforms: Vec<PlatformPlan>,
    #[serde(default)]
    pub hashtags: Vec<HashtagGroup>,
    #[serde(default)]
    pub calendar: Vec<CalendarSlot>,
    #[serde(default)]
    pub kpis: Vec<KpiTarget>,
    #[serde(default)]
    pub personas: Vec<Persona>,
    #[serde(default)]
    pub voice: String,
}

// ---------------------------------------------------------------------------
// The page itself
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrandPage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub logos: LogoSet,
    #[serde(default)]
    pub heading_font: FontChoice,
    #[serde(default)]
    pub body_font: FontChoice,
    #[serde(default)]
    pub palette: Vec<PaletteColor>,
    #[serde(default)]
    pub mockups: Vec<String>,
    #[serde(default)]
    pub template: TemplateId,
    #[serde(default)]
    pub sections: SectionToggles,
    #[serde(default)]
    pub section_text: BTreeMap<Section, SectionText>,
    #[serde(default)]
    pub social: Option<SocialStrategy>,
    /// Open extension slot for template-specific data this crate does not
    /// model. Carried through serialization untouched.
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BrandPage {
    /// The showcase brand page embedded in the demo project.
    pub fn demo() -> Self {
        Self {
            name: "Aurora Coffee".to_string(),
            tagline: "Slow mornings, bright beans".to_string(),
            story: "Aurora started as a single roaster in a garage and grew \
                    into a neighbourhood ritual."
                .to_string(),
            heading_font: FontChoice {
                family: "Fraunces".to_string(),
                file_url: None,
            },
            body_font: FontChoice {
                family: "Inter".to_string(),
                file_url: None,
            },
            palette: vec![
                PaletteColor {
                    name: "Dawn".to_string(),
                    hex: "#f4a259".to_string(),
                },
                PaletteColor {
                    name: "Roast".to_string(),
                    hex: "#3d2b1f".to_string(),
                },
                PaletteColor {
                    name: "Cream".to_string(),
                    hex: "#fff3e2".to_string(),
                },
            ],
            template: TemplateId::Editorial,
            ..Self::default()
        }
    }

    /// The heading text for a section: the admin's override when present,
    /// otherwise the template's default.
    pub fn section_title<'a>(&'a self, section: Section, fallback: &'a str) -> &'a str {
        self.section_text
            .get(&section)
            .and_then(|t| t.title.as_deref())
            .unwrap_or(fallback)
    }

    pub fn section_subtitle(&self, section: Section) -> Option<&str> {
        self.section_text
            .get(&section)
            .and_then(|t| t.subtitle.as_deref())
    }
}
