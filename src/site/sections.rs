//! Page-specific and shared sections.
//!
//! Each section targets one container id. A container the shell does not
//! have is skipped; a list section with nothing to show gets the
//! "coming soon" placeholder instead of staying empty.

use super::page::Page;
use crate::{
    model::{CourseLevel, SiteData},
    render,
    utils::dom::{Document, DomResult},
};
use chrono::Datelike;

/// Writes sections into one document.
pub(crate) struct Sections<'a> {
    doc: &'a mut Document,
    coming_soon: String,
}

impl<'a> Sections<'a> {
    pub(crate) fn new(doc: &'a mut Document, coming_soon: &str) -> Self {
        Self {
            doc,
            coming_soon: format!(r#"<p class="coming-soon">{coming_soon}</p>"#),
        }
    }

    /// Fill a list container, falling back to the placeholder when `html`
    /// is empty.
    fn list(&mut self, id: &str, html: String) -> DomResult<()> {
        let html = if html.is_empty() {
            self.coming_soon.clone()
        } else {
            html
        };
        self.doc.set_inner_html(id, &html)?;
        Ok(())
    }

    /// Fill a container only when there is something to show.
    fn block(&mut self, id: &str, html: Option<String>) -> DomResult<()> {
        if let Some(html) = html {
            self.doc.set_inner_html(id, &html)?;
        }
        Ok(())
    }

    /// Render the sections of `page`.
    pub(crate) fn page(&mut self, page: Page, data: &SiteData) -> DomResult<()> {
        match page {
            Page::Index => self.index(data),
            Page::About => self.about(data),
            Page::Projects => self.list(
                "projects-grid",
                render::render_projects(&data.projects, true),
            ),
            Page::Courses => {
                self.list(
                    "masters-grid",
                    render::render_courses(&data.masters, CourseLevel::Master),
                )?;
                self.list(
                    "bachelors-grid",
                    render::render_courses(&data.bachelors, CourseLevel::Bachelor),
                )?;
                self.list(
                    "certifications-grid",
                    render::render_certifications(&data.certifications),
                )
            }
            Page::Journey => {
                self.list(
                    "education-timeline",
                    render::render_education_timeline(&data.education),
                )?;
                self.list("work-timeline", render::render_work_timeline(&data.work))
            }
            Page::News => self.list("news-timeline", render::render_news(&data.news)),
            Page::Contact => {
                let cards = data
                    .personal
                    .as_ref()
                    .map(|p| render::render_contact_cards(&p.social))
                    .unwrap_or_default();
                self.list("contact-grid", cards)
            }
        }
    }

    fn index(&mut self, data: &SiteData) -> DomResult<()> {
        if let Some(personal) = &data.personal {
            self.block("hero", Some(render::render_hero(personal)))?;
            self.block(
                "stats-grid",
                Some(render::render_stats(&personal.stats)).filter(|html| !html.is_empty()),
            )?;
        }

        let projects: Vec<_> = data
            .projects
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect();
        let courses: Vec<_> = data
            .masters
            .iter()
            .chain(&data.bachelors)
            .filter(|c| c.featured)
            .cloned()
            .collect();
        let certifications: Vec<_> = data
            .certifications
            .iter()
            .filter(|c| c.featured)
            .cloned()
            .collect();
        let education: Vec<_> = data
            .education
            .iter()
            .filter(|e| e.featured)
            .cloned()
            .collect();
        let work: Vec<_> = data.work.iter().filter(|w| w.featured).cloned().collect();
        let news: Vec<_> = data.news.iter().filter(|n| n.news).cloned().collect();

        self.list(
            "featured-projects",
            render::render_featured_projects(&projects),
        )?;
        self.list("featured-courses", render::render_featured_courses(&courses))?;
        self.list(
            "featured-certifications",
            render::render_featured_certifications(&certifications),
        )?;
        self.list(
            "featured-education",
            render::render_featured_education(&education),
        )?;
        self.list("featured-work", render::render_featured_work(&work))?;
        self.list("home-news", render::render_news(&news))
    }

    fn about(&mut self, data: &SiteData) -> DomResult<()> {
        if let Some(personal) = &data.personal {
            self.block(
                "about-bio",
                personal.bio.as_ref().map(|bio| format!("<p>{bio}</p>")),
            )?;
            self.block(
                "stats-grid",
                Some(render::render_stats(&personal.stats)).filter(|html| !html.is_empty()),
            )?;
        }
        self.list("languages-grid", render::render_languages(&data.languages))?;
        self.list("interests-grid", render::render_interests(&data.interests))
    }

    /// CTA and footer, present on every page.
    pub(crate) fn shared(&mut self, data: &SiteData) -> DomResult<()> {
        self.block(
            "cta-section",
            data.content.cta.as_ref().map(render::render_cta),
        )?;

        if let Some(personal) = &data.personal {
            let links = [
                (
                    "footer-github",
                    personal
                        .github
                        .as_ref()
                        .map(|user| format!("https://github.com/{user}")),
                ),
                (
                    "footer-linkedin",
                    personal
                        .linkedin
                        .as_ref()
                        .map(|user| format!("https://linkedin.com/in/{user}")),
                ),
                (
                    "footer-email",
                    personal.email.as_ref().map(|email| format!("mailto:{email}")),
                ),
            ];
            for (id, href) in links {
                if let Some(href) = href {
                    self.doc.set_attribute(id, "href", &href)?;
                }
            }
        }

        let year = chrono::Local::now().year();
        self.doc.set_text("footer-year", &year.to_string())?;
        Ok(())
    }
}
