//! Site-owner profile and site-wide content (`personal.json`, `config.json`).

use serde::Deserialize;

use super::records::Stat;

/// `data/personal.json`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personal {
    pub name: String,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
    /// Plain address, used for the footer `mailto:` link.
    pub email: Option<String>,
    /// GitHub username.
    pub github: Option<String>,
    /// LinkedIn profile slug.
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "super::lenient_vec")]
    pub stats: Vec<Stat>,
    pub social: Social,
}

/// Contact channels rendered as cards on the contact page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Social {
    pub email: Option<EmailChannel>,
    pub linkedin: Option<ProfileChannel>,
    pub github: Option<ProfileChannel>,
    pub cv: Option<CvChannel>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmailChannel {
    pub address: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileChannel {
    pub url: String,
    pub username: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CvChannel {
    pub url: String,
    pub icon: String,
}

/// Call-to-action block shown above the footer on every page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub primary_button: CtaButton,
    #[serde(default)]
    pub secondary_button: Option<CtaButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CtaButton {
    pub href: String,
    pub text: String,
    /// Open in a new tab.
    #[serde(default)]
    pub external: bool,
}

/// `data/config.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteContent {
    pub cta: Option<Cta>,
    /// Placeholder for list sections with nothing to show.
    pub coming_soon: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            cta: None,
            coming_soon: DEFAULT_COMING_SOON.to_owned(),
        }
    }
}

pub const DEFAULT_COMING_SOON: &str = "Coming soon...";
