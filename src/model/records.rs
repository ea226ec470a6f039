//! Display records for the list sections.
//!
//! Required fields have no serde default: a record missing one fails to
//! decode and is dropped by [`super::collection`]. Everything else defaults
//! to absent/empty so renderers can gate on it. Display-only scalars such as
//! years and grades accept JSON numbers as well as strings.

use serde::Deserialize;

/// Headline number on the home and about pages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    #[serde(deserialize_with = "super::scalar_string")]
    pub number: String,
    pub label: String,
    #[serde(default)]
    pub sublabel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_label: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub badge_class: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "super::scalar_string_opt")]
    pub grade: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "link")]
    pub url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Which degree a course belongs to; selects the card's CSS class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseLevel {
    #[default]
    Master,
    Bachelor,
}

impl CourseLevel {
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Bachelor => "bachelor",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub title: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default, alias = "icon")]
    pub issuer_icon: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "id")]
    pub cert_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "link")]
    pub url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub period: Option<String>,
    /// `current` switches the grade label to "Current GPA".
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_label: Option<String>,
    #[serde(default)]
    pub status_badge: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_string_opt")]
    pub gpa: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thesis: Option<Link>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl EducationEntry {
    pub fn is_current(&self) -> bool {
        self.status.as_deref() == Some("current")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl WorkEntry {
    pub fn is_upcoming(&self) -> bool {
        self.status.as_deref() == Some("upcoming")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    #[serde(default, deserialize_with = "super::scalar_string_opt")]
    pub year: Option<String>,
    /// Emit a year marker before this item.
    #[serde(default)]
    pub show_year: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Highlight on the home page.
    #[serde(default)]
    pub news: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    pub name: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub detail: Option<String>,
    /// Bar width, clamped to 0..=100 when rendered.
    #[serde(default, deserialize_with = "super::percentage")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: String,
}
