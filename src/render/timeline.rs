//! Vertical timelines: education, work and news.

use super::{render_each, tags};
use crate::model::{EducationEntry, NewsItem, WorkEntry};
use std::fmt::Write;

fn open_item(out: &mut String, extra_class: &str, period: Option<&str>) {
    let _ = write!(
        out,
        r#"<div class="timeline-item{extra_class}"><div class="timeline-marker"></div><div class="timeline-content">"#
    );
    if let Some(period) = period {
        let _ = write!(out, r#"<span class="timeline-date">{period}</span>"#);
    }
}

pub fn render_education_timeline(education: &[EducationEntry]) -> String {
    render_each(education, |out, entry| {
        open_item(out, "", entry.period.as_deref());
        if let Some(label) = &entry.status_label {
            let badge = entry.status_badge.as_deref().unwrap_or("badge-primary");
            let _ = write!(
                out,
                r#"<span class="badge {badge}" style="margin-bottom: 0.5rem;">{label}</span>"#
            );
        }
        let _ = write!(
            out,
            r#"<h3 class="timeline-title">{}</h3><p class="timeline-subtitle">{}"#,
            entry.degree, entry.institution
        );
        if let Some(gpa) = &entry.gpa {
            let label = if entry.is_current() {
                "Current GPA"
            } else {
                "Final Grade"
            };
            let _ = write!(out, " • {label}: {gpa}");
        }
        let gap = if entry.thesis.is_some() { "1rem" } else { "0" };
        let _ = write!(
            out,
            r#"</p><p style="color: var(--text-secondary); line-height: 1.7; margin-bottom: {gap}">{}</p>"#,
            entry.description
        );
        if let Some(thesis) = &entry.thesis {
            let _ = write!(
                out,
                r#"<a href="{}" target="_blank" class="link">View Bachelor's Thesis →</a>"#,
                thesis.url
            );
        }
        out.push_str("</div></div>");
    })
}

/// Work timeline. Technology tags render only when the list is non-empty.
pub fn render_work_timeline(work: &[WorkEntry]) -> String {
    render_each(work, |out, job| {
        let upcoming = job.is_upcoming();
        open_item(
            out,
            if upcoming { " timeline-upcoming" } else { "" },
            job.period.as_deref(),
        );
        if upcoming {
            out.push_str(
                r#"<span class="badge badge-warning" style="margin-bottom: 0.5rem;">Upcoming</span>"#,
            );
        }
        let _ = write!(
            out,
            r#"<h3 class="timeline-title">{}</h3><p class="timeline-subtitle">{}"#,
            job.title, job.company
        );
        if let Some(location) = &job.location {
            let _ = write!(out, " • {location}");
        }
        let gap = if job.responsibilities.is_empty() {
            "0"
        } else {
            "1rem"
        };
        let _ = write!(
            out,
            r#"</p><p style="color: var(--text-secondary); line-height: 1.7; margin-bottom: {gap}">{}</p>"#,
            job.description
        );
        if !job.responsibilities.is_empty() {
            out.push_str(r#"<ul class="work-responsibilities">"#);
            for item in &job.responsibilities {
                let _ = write!(out, "<li>{item}</li>");
            }
            out.push_str("</ul>");
        }
        if !job.technologies.is_empty() {
            out.push_str(r#"<div class="tags" style="margin-top: 1rem;">"#);
            for tech in &job.technologies {
                let _ = write!(out, r#"<span class="tag">{tech}</span>"#);
            }
            out.push_str("</div>");
        }
        out.push_str("</div></div>");
    })
}

/// News timeline, with a year marker before each item flagged `showYear`.
pub fn render_news(news: &[NewsItem]) -> String {
    render_each(news, |out, item| {
        if item.show_year {
            let _ = write!(
                out,
                r#"<div class="news-year-marker"><div class="news-year-dot"></div><span class="news-year-label">{}</span></div>"#,
                item.year.as_deref().unwrap_or_default()
            );
        }
        out.push_str(r#"<div class="news-item"><div class="news-marker"></div><div class="news-content"><h3 class="news-title">"#);
        if let Some(icon) = &item.icon {
            let _ = write!(out, "{icon} ");
        }
        let _ = write!(
            out,
            r#"{}</h3><p class="news-description">{}</p>"#,
            item.title, item.description
        );
        tags(out, &item.tags);
        out.push_str("</div></div>");
    })
}
