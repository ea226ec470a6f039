//! Typed views over the loaded JSON documents.
//!
//! Decoding happens once per page at the loading boundary. A malformed record
//! is logged and dropped; its siblings survive. A malformed singleton
//! document (`personal`, `config`) falls back to its default.
//!
//! | document | shape |
//! |----------|-------|
//! | `config` | [`SiteContent`] |
//! | `personal` | [`Personal`] |
//! | `projects` | `[Project]` or `{"projects": [...]}` |
//! | `courses` | `{"masters": [...], "bachelors": [...]}` |
//! | `certifications` | `[Certification]` or `{"certifications": [...]}` |
//! | `education` / `work` / `news` | list or `{"<name>": [...]}` |
//! | `about` | `{"languages": [...], "interests": [...]}` |

mod profile;
mod records;

pub use profile::{
    Cta, CtaButton, CvChannel, DEFAULT_COMING_SOON, EmailChannel, Personal, ProfileChannel,
    SiteContent, Social,
};
pub use records::{
    Certification, Course, CourseLevel, EducationEntry, Interest, LanguageSkill, Link, NewsItem,
    Project, Stat, WorkEntry,
};

use crate::{loader::DataBundle, log};
use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error as _},
};
use serde_json::Value;

/// Decode the list stored under `key`.
///
/// `doc` may be the list itself or an object holding it under `key`.
pub fn collection<T: DeserializeOwned>(doc: Option<&Value>, key: &str) -> Vec<T> {
    let items = match doc {
        None => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => match map.get(key) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                log!("warn"; "`{key}` is not a list, ignoring");
                return Vec::new();
            }
            None => return Vec::new(),
        },
        Some(_) => {
            log!("warn"; "`{key}` document is neither a list nor an object");
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(err) => {
                log!("warn"; "dropping {key}[{index}]: {err}");
                None
            }
        })
        .collect()
}

/// Decode a singleton document, falling back to `T::default()`.
pub fn document<T: DeserializeOwned + Default>(doc: Option<&Value>, name: &str) -> T {
    doc.map_or_else(T::default, |value| {
        T::deserialize(value).unwrap_or_else(|err| {
            log!("warn"; "{name}: {err}, using defaults");
            T::default()
        })
    })
}

/// `deserialize_with` helper that keeps the well-formed items of a list.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items
        .iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

/// Text of a JSON scalar, so `"year": 2024` reads the same as `"2024"`.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// `deserialize_with` helper for display fields that may be strings or numbers.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let shown = value.to_string();
    scalar_text(value).ok_or_else(|| D::Error::custom(format!("expected a scalar, found {shown}")))
}

/// Optional form of [`scalar_string`]; `null` is absent.
pub(crate) fn scalar_string_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => {
            let shown = value.to_string();
            scalar_text(value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected a scalar, found {shown}")))
        }
    }
}

/// A percentage given as a number, `"87.5"` or `"87.5%"`.
pub(crate) fn percentage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        Value::Null => Some(0.0),
        _ => None,
    };
    parsed
        .filter(|p: &f64| p.is_finite())
        .ok_or_else(|| D::Error::custom(format!("invalid percentage {value}")))
}

/// Everything one page can render, decoded from its [`DataBundle`].
///
/// Documents the page did not request (or that failed to load) decode to
/// empty collections.
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub content: SiteContent,
    pub personal: Option<Personal>,
    pub projects: Vec<Project>,
    pub masters: Vec<Course>,
    pub bachelors: Vec<Course>,
    pub certifications: Vec<Certification>,
    pub education: Vec<EducationEntry>,
    pub work: Vec<WorkEntry>,
    pub news: Vec<NewsItem>,
    pub languages: Vec<LanguageSkill>,
    pub interests: Vec<Interest>,
}

impl SiteData {
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        let courses = bundle.get("courses");
        let about = bundle.get("about");

        // Certifications may also ride along in courses.json
        let mut certifications = collection(bundle.get("certifications"), "certifications");
        if certifications.is_empty() {
            certifications = collection(courses, "certifications");
        }

        Self {
            content: document(bundle.get("config"), "config"),
            personal: bundle
                .get("personal")
                .map(|doc| document(Some(doc), "personal")),
            projects: collection(bundle.get("projects"), "projects"),
            masters: collection(courses, "masters"),
            bachelors: collection(courses, "bachelors"),
            certifications,
            education: collection(bundle.get("education"), "education"),
            work: collection(bundle.get("work"), "work"),
            news: collection(bundle.get("news"), "news"),
            languages: collection(about, "languages"),
            interests: collection(about, "interests"),
        }
    }

    /// Scalar `personal` fields for `{{key}}` placeholders.
    pub fn placeholder_values(&self) -> Value {
        let Some(personal) = &self.personal else {
            return Value::Object(Default::default());
        };
        let mut map = serde_json::Map::new();
        let mut put = |key: &str, value: Option<&str>| {
            if let Some(value) = value {
                map.insert(key.to_owned(), Value::String(value.to_owned()));
            }
        };
        put("name", Some(&personal.name));
        put("title", personal.title.as_deref());
        put("tagline", personal.tagline.as_deref());
        put("location", personal.location.as_deref());
        put("email", personal.email.as_deref());
        put("github", personal.github.as_deref());
        put("linkedin", personal.linkedin.as_deref());
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_accepts_list_or_keyed_object() {
        let list = json!([{"title": "A"}]);
        let keyed = json!({"projects": [{"title": "B"}]});

        let a: Vec<Project> = collection(Some(&list), "projects");
        let b: Vec<Project> = collection(Some(&keyed), "projects");

        assert_eq!(a[0].title, "A");
        assert_eq!(b[0].title, "B");
    }

    #[test]
    fn test_collection_drops_malformed_records_only() {
        let doc = json!([
            {"title": "Kept", "tags": ["rust"]},
            {"description": "no title"},
            {"title": "Also kept", "tags": "not-a-list"},
            {"title": "Last"}
        ]);

        let projects: Vec<Project> = collection(Some(&doc), "projects");

        let titles: Vec<_> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Kept", "Last"]);
    }

    #[test]
    fn test_collection_missing_inputs_are_empty() {
        assert!(collection::<Project>(None, "projects").is_empty());
        assert!(collection::<Project>(Some(&json!({"other": []})), "projects").is_empty());
        assert!(collection::<Project>(Some(&json!(42)), "projects").is_empty());
        assert!(collection::<Project>(Some(&json!({"projects": 1})), "projects").is_empty());
    }

    #[test]
    fn test_optional_fields_default_to_absent() {
        let doc = json!([{"title": "Bare"}]);
        let project = &collection::<Project>(Some(&doc), "projects")[0];
        assert!(project.tags.is_empty());
        assert!(project.url.is_none());
        assert!(project.badge.is_none());
        assert!(!project.featured);
    }

    #[test]
    fn test_aliases_from_course_documents() {
        let doc = json!({"masters": [{"title": "Compilers", "grade": "30/30", "link": "https://c"}]});
        let courses: Vec<Course> = collection(Some(&doc), "masters");
        assert_eq!(courses[0].name, "Compilers");
        assert_eq!(courses[0].url.as_deref(), Some("https://c"));
    }

    #[test]
    fn test_document_falls_back_to_default() {
        let content: SiteContent = document(Some(&json!({"comingSoon": 3})), "config");
        assert_eq!(content.coming_soon, DEFAULT_COMING_SOON);

        let content: SiteContent = document(None, "config");
        assert!(content.cta.is_none());
    }

    #[test]
    fn test_personal_stats_are_lenient() {
        let doc = json!({
            "name": "Ada",
            "stats": [{"number": "5", "label": "Projects"}, {"label": "broken"}]
        });
        let personal: Personal = document(Some(&doc), "personal");
        assert_eq!(personal.name, "Ada");
        assert_eq!(personal.stats.len(), 1);
    }

    #[test]
    fn test_numeric_display_fields_are_kept() {
        let news: Vec<NewsItem> =
            collection(Some(&json!([{"title": "N", "year": 2024, "showYear": true}])), "news");
        assert_eq!(news[0].year.as_deref(), Some("2024"));

        let courses: Vec<Course> =
            collection(Some(&json!({"masters": [{"name": "OS", "grade": 30}]})), "masters");
        assert_eq!(courses[0].grade.as_deref(), Some("30"));

        let doc = json!([{"degree": "BSc", "gpa": 110, "institution": "Uni"}]);
        let education: Vec<EducationEntry> = collection(Some(&doc), "education");
        assert_eq!(education.len(), 1);
        assert_eq!(education[0].gpa.as_deref(), Some("110"));

        let personal: Personal = document(
            Some(&json!({"name": "Ada", "stats": [{"number": 5, "label": "Projects"}]})),
            "personal",
        );
        assert_eq!(personal.stats[0].number, "5");

        let languages: Vec<LanguageSkill> = collection(
            Some(&json!([
                {"name": "Italian", "percentage": 87.5},
                {"name": "English", "percentage": "90%"},
                {"name": "French"},
                {"name": "Broken", "percentage": "fluent"}
            ])),
            "languages",
        );
        let parsed: Vec<_> = languages.iter().map(|l| (l.name.as_str(), l.percentage)).collect();
        assert_eq!(parsed, vec![("Italian", 87.5), ("English", 90.0), ("French", 0.0)]);
    }

    #[test]
    fn test_structured_values_in_scalar_fields_drop_the_record() {
        let news: Vec<NewsItem> = collection(
            Some(&json!([{"title": "A", "year": ["2024"]}, {"title": "B", "year": null}])),
            "news",
        );
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "B");
        assert!(news[0].year.is_none());
    }

    #[test]
    fn test_placeholder_values_skip_absent_fields() {
        let data = SiteData {
            personal: Some(Personal {
                name: "Ada".into(),
                github: Some("ada".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let values = data.placeholder_values();
        assert_eq!(values["name"], "Ada");
        assert_eq!(values["github"], "ada");
        assert!(values.get("email").is_none());
    }
}
