//! Card grids: projects, courses, certifications and the featured row.

use super::{render_each, tags};
use crate::model::{Certification, Course, CourseLevel, EducationEntry, Project, WorkEntry};
use std::fmt::Write;

const DEFAULT_BADGE_CLASS: &str = "badge-primary";

// ============================================================================
// Full grids
// ============================================================================

/// Project cards. The badge block needs both `show_badge` and a badge.
pub fn render_projects(projects: &[Project], show_badge: bool) -> String {
    render_each(projects, |out, project| {
        out.push_str(r#"<div class="project-card"><div class="project-header">"#);
        if show_badge && let Some(badge) = &project.badge {
            let class = project.badge_class.as_deref().unwrap_or(DEFAULT_BADGE_CLASS);
            let _ = write!(
                out,
                r#"<div class="project-badge"><span class="badge {class}">{badge}</span></div>"#
            );
        }
        let _ = write!(out, r#"<h3 class="project-title">{}</h3>"#, project.title);
        if let Some(period) = &project.period {
            let _ = write!(out, r#"<span class="project-period">{period}</span>"#);
        }
        let _ = write!(
            out,
            r#"</div><div class="project-body"><p class="project-description">{}</p></div>"#,
            project.description
        );
        tags(out, &project.tags);
        if let Some(url) = &project.url {
            let label = project.url_label.as_deref().unwrap_or("View on GitHub");
            let _ = write!(
                out,
                r#"<div class="project-footer"><a href="{url}" target="_blank" class="link">{label}</a></div>"#
            );
        }
        out.push_str("</div>");
    })
}

/// Course cards, classed by degree level.
pub fn render_courses(courses: &[Course], level: CourseLevel) -> String {
    render_each(courses, |out, course| {
        let _ = write!(
            out,
            r#"<div class="course-card {}"><div class="course-header"><h3>{}</h3>"#,
            level.as_class(),
            course.name
        );
        if let Some(grade) = &course.grade {
            let _ = write!(out, r#"<span class="course-grade">{grade}</span>"#);
        }
        let _ = write!(
            out,
            r#"</div><div class="course-body"><p class="course-description">{}</p></div>"#,
            course.description
        );
        tags(out, &course.tags);
        if let Some(url) = &course.url {
            let _ = write!(
                out,
                r#"<div class="course-footer"><a href="{url}" target="_blank" class="link">View Details →</a></div>"#
            );
        }
        out.push_str("</div>");
    })
}

/// Certification cards.
///
/// The issuer logo is `assets/CA/{issuer_icon}.png`; when it fails to load
/// the icon box falls back to [`issuer_initials`].
pub fn render_certifications(certifications: &[Certification]) -> String {
    render_each(certifications, |out, cert| {
        out.push_str(r#"<div class="cert-card"><div class="cert-icon">"#);
        let initials = issuer_initials(&cert.issuer);
        match &cert.issuer_icon {
            Some(icon) => {
                let _ = write!(
                    out,
                    r#"<img src="assets/CA/{icon}.png" alt="{issuer}" onerror="this.style.display='none'; this.parentElement.classList.add('{icon}'); this.parentElement.textContent='{initials}';">"#,
                    issuer = cert.issuer,
                );
            }
            None => out.push_str(&initials),
        }
        let _ = write!(
            out,
            r#"</div><h3>{}</h3><p class="cert-issuer">{}"#,
            cert.title, cert.issuer
        );
        if let Some(date) = &cert.date {
            let _ = write!(out, " • {date}");
        }
        if let Some(id) = &cert.cert_id {
            let _ = write!(out, " • ID: {id}");
        }
        let _ = write!(
            out,
            r#"</p><div class="cert-body"><p class="cert-description">{}</p></div>"#,
            cert.description
        );
        tags(out, &cert.tags);
        if let Some(url) = &cert.url {
            let _ = write!(
                out,
                r#"<div class="cert-footer"><a href="{url}" target="_blank" class="link">View Certificate →</a></div>"#
            );
        }
        out.push_str("</div>");
    })
}

/// Short text shown in place of a missing issuer logo.
pub fn issuer_initials(issuer: &str) -> String {
    const KNOWN: &[(&str, &str)] = &[
        ("EC-Council", "EC"),
        ("Politecnico", "PM"),
        ("Udemy", "U"),
        ("Brescia", "UB"),
    ];

    KNOWN
        .iter()
        .find(|(needle, _)| issuer.contains(needle))
        .map_or_else(
            || issuer.chars().take(2).flat_map(char::to_uppercase).collect(),
            |(_, initials)| (*initials).to_owned(),
        )
}

// ============================================================================
// Featured cards (home page)
// ============================================================================

/// Shared `featured-card` shell: badge, title, subtitle, body, tags, footer.
struct Featured<'a> {
    kind: &'a str,
    badge_class: &'a str,
    badge: &'a str,
    title: &'a str,
    subtitle: Option<String>,
    description: &'a str,
    tags: &'a [String],
    link: Option<(&'a str, &'a str, bool)>,
}

impl Featured<'_> {
    fn write(&self, out: &mut String) {
        let _ = write!(
            out,
            r#"<div class="featured-card {}"><div class="featured-badge"><span class="badge {}">{}</span></div><h3 class="featured-title">{}</h3>"#,
            self.kind, self.badge_class, self.badge, self.title
        );
        if let Some(subtitle) = &self.subtitle {
            let _ = write!(out, r#"<p class="featured-subtitle">{subtitle}</p>"#);
        }
        let _ = write!(
            out,
            r#"<div class="featured-body"><p class="featured-description">{}</p></div>"#,
            self.description
        );
        tags(out, self.tags);
        if let Some((href, label, external)) = self.link {
            let target = if external { r#" target="_blank""# } else { "" };
            let _ = write!(
                out,
                r#"<div class="featured-footer"><a href="{href}"{target} class="link">{label}</a></div>"#
            );
        }
        out.push_str("</div>");
    }
}

/// `a • b`, or whichever side is present.
fn joined(a: &str, b: Option<&str>) -> Option<String> {
    match (a.is_empty(), b) {
        (true, None) => None,
        (true, Some(b)) => Some(b.to_owned()),
        (false, None) => Some(a.to_owned()),
        (false, Some(b)) => Some(format!("{a} • {b}")),
    }
}

pub fn render_featured_projects(projects: &[Project]) -> String {
    render_each(projects, |out, project| {
        Featured {
            kind: "featured-project",
            badge_class: project.badge_class.as_deref().unwrap_or(DEFAULT_BADGE_CLASS),
            badge: project.badge.as_deref().unwrap_or("Project"),
            title: &project.title,
            subtitle: project.period.clone(),
            description: &project.description,
            tags: &project.tags,
            link: project.url.as_deref().map(|url| {
                let label = project.url_label.as_deref().unwrap_or("View on GitHub →");
                (url, label, true)
            }),
        }
        .write(out);
    })
}

pub fn render_featured_courses(courses: &[Course]) -> String {
    render_each(courses, |out, course| {
        Featured {
            kind: "featured-course",
            badge_class: "badge-success",
            badge: "Course",
            title: &course.name,
            subtitle: course.grade.as_ref().map(|grade| format!("Grade: {grade}")),
            description: &course.description,
            tags: &course.tags,
            link: course
                .url
                .as_deref()
                .map(|url| (url, "View Details →", true)),
        }
        .write(out);
    })
}

pub fn render_featured_certifications(certifications: &[Certification]) -> String {
    render_each(certifications, |out, cert| {
        Featured {
            kind: "featured-cert",
            badge_class: "badge-warning",
            badge: "Certification",
            title: &cert.title,
            subtitle: joined(&cert.issuer, cert.date.as_deref()),
            description: &cert.description,
            tags: &cert.tags,
            link: cert
                .url
                .as_deref()
                .map(|url| (url, "View Certificate →", true)),
        }
        .write(out);
    })
}

pub fn render_featured_education(education: &[EducationEntry]) -> String {
    render_each(education, |out, entry| {
        Featured {
            kind: "featured-education",
            badge_class: entry.status_badge.as_deref().unwrap_or(DEFAULT_BADGE_CLASS),
            badge: entry.status_label.as_deref().unwrap_or("Education"),
            title: &entry.degree,
            subtitle: joined(&entry.institution, entry.period.as_deref()),
            description: &entry.description,
            tags: &entry.tags,
            link: Some(("journey.html", "View Journey →", false)),
        }
        .write(out);
    })
}

pub fn render_featured_work(work: &[WorkEntry]) -> String {
    render_each(work, |out, job| {
        let upcoming = job.is_upcoming();
        Featured {
            kind: if upcoming {
                "featured-work featured-upcoming"
            } else {
                "featured-work"
            },
            badge_class: if upcoming { "badge-warning" } else { "badge-accent" },
            badge: if upcoming { "Upcoming" } else { "Work" },
            title: &job.title,
            subtitle: joined(&job.company, job.period.as_deref()),
            description: &job.description,
            tags: &job.tags,
            link: Some(("journey.html", "View Journey →", false)),
        }
        .write(out);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            title: "Compiler".into(),
            description: "A toy compiler".into(),
            tags: vec!["rust".into()],
            badge: Some("New".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_projects_empty() {
        assert_eq!(render_projects(&[], true), "");
        assert_eq!(render_courses(&[], CourseLevel::Master), "");
        assert_eq!(render_certifications(&[]), "");
        assert_eq!(render_featured_work(&[]), "");
    }

    #[test]
    fn test_render_projects_badge_gating() {
        let without = render_projects(&[project()], false);
        assert!(without.contains("Compiler"));
        assert!(without.contains("A toy compiler"));
        assert!(without.contains(r#"<span class="tag">rust</span>"#));
        assert!(!without.contains("project-badge"));

        let with = render_projects(&[project()], true);
        assert!(with.contains(r#"<span class="badge badge-primary">New</span>"#));

        let no_badge = Project {
            badge: None,
            ..project()
        };
        assert!(!render_projects(&[no_badge], true).contains("project-badge"));
    }

    #[test]
    fn test_render_projects_keeps_order_and_duplicates() {
        let a = Project {
            title: "A".into(),
            ..Default::default()
        };
        let b = Project {
            title: "B".into(),
            ..Default::default()
        };
        let html = render_projects(&[b.clone(), a, b], false);
        assert_eq!(html.matches("project-card").count(), 3);
        let first_b = html.find(">B<").unwrap();
        let a_pos = html.find(">A<").unwrap();
        assert!(first_b < a_pos);
    }

    #[test]
    fn test_render_projects_link_label() {
        let p = Project {
            url: Some("https://example.com".into()),
            ..project()
        };
        assert!(render_projects(&[p.clone()], false).contains(">View on GitHub</a>"));

        let labelled = Project {
            url_label: Some("Demo".into()),
            ..p
        };
        assert!(render_projects(&[labelled], false).contains(">Demo</a>"));
    }

    #[test]
    fn test_render_courses_level_class() {
        let course = Course {
            name: "Networks".into(),
            grade: Some("30L".into()),
            ..Default::default()
        };
        let html = render_courses(std::slice::from_ref(&course), CourseLevel::Bachelor);
        assert!(html.starts_with(r#"<div class="course-card bachelor">"#));
        assert!(html.contains(r#"<span class="course-grade">30L</span>"#));
        assert!(!html.contains("course-footer"));
    }

    #[test]
    fn test_render_certifications_optional_id() {
        let cert = Certification {
            title: "CEH".into(),
            issuer: "EC-Council".into(),
            issuer_icon: Some("ec".into()),
            date: Some("2024".into()),
            ..Default::default()
        };
        let html = render_certifications(std::slice::from_ref(&cert));
        assert!(html.contains("EC-Council • 2024</p>"));
        assert!(!html.contains("ID:"));
        assert!(html.contains("textContent='EC'"));

        let with_id = Certification {
            cert_id: Some("X-1".into()),
            ..cert
        };
        assert!(render_certifications(&[with_id]).contains(" • ID: X-1"));
    }

    #[test]
    fn test_issuer_initials() {
        assert_eq!(issuer_initials("EC-Council"), "EC");
        assert_eq!(issuer_initials("Politecnico di Milano"), "PM");
        assert_eq!(issuer_initials("Udemy"), "U");
        assert_eq!(issuer_initials("Università di Brescia"), "UB");
        assert_eq!(issuer_initials("cisco"), "CI");
        assert_eq!(issuer_initials("x"), "X");
        assert_eq!(issuer_initials(""), "");
    }

    #[test]
    fn test_featured_work_upcoming() {
        let job = WorkEntry {
            title: "Engineer".into(),
            company: "Acme".into(),
            period: Some("2025".into()),
            status: Some("upcoming".into()),
            ..Default::default()
        };
        let html = render_featured_work(&[job]);
        assert!(html.contains("featured-work featured-upcoming"));
        assert!(html.contains(r#"<span class="badge badge-warning">Upcoming</span>"#));
        assert!(html.contains("Acme • 2025"));
        assert!(html.contains(r#"href="journey.html" class="link""#));
    }

    #[test]
    fn test_featured_subtitles() {
        assert_eq!(joined("", None), None);
        assert_eq!(joined("Acme", None).as_deref(), Some("Acme"));
        assert_eq!(joined("", Some("2024")).as_deref(), Some("2024"));

        let course = Course {
            name: "OS".into(),
            ..Default::default()
        };
        assert!(!render_featured_courses(&[course]).contains("featured-subtitle"));
    }
}
