//! Personal sections: hero, stats, about page grids, contacts and the CTA.

use super::render_each;
use crate::model::{Cta, Interest, LanguageSkill, Personal, Social, Stat};
use std::fmt::Write;

pub fn render_stats(stats: &[Stat]) -> String {
    render_each(stats, |out, stat| {
        let _ = write!(
            out,
            r#"<div class="stat-card"><span class="stat-number">{}</span><span class="stat-label">{}</span>"#,
            stat.number, stat.label
        );
        if let Some(sublabel) = &stat.sublabel {
            let _ = write!(out, r#"<span class="stat-sublabel">{sublabel}</span>"#);
        }
        out.push_str("</div>");
    })
}

/// Hero block: avatar, name, title, tagline and location.
pub fn render_hero(personal: &Personal) -> String {
    let mut out = String::with_capacity(512);
    out.push_str(r#"<div class="hero-content">"#);
    if let Some(avatar) = &personal.avatar {
        let _ = write!(
            out,
            r#"<img class="hero-avatar" src="{avatar}" alt="{}">"#,
            personal.name
        );
    }
    let _ = write!(out, r#"<h1 class="hero-title">{}</h1>"#, personal.name);
    if let Some(title) = &personal.title {
        let _ = write!(out, r#"<p class="hero-subtitle">{title}</p>"#);
    }
    if let Some(tagline) = &personal.tagline {
        let _ = write!(out, r#"<p class="hero-tagline">{tagline}</p>"#);
    }
    if let Some(location) = &personal.location {
        let _ = write!(out, r#"<p class="hero-location">📍 {location}</p>"#);
    }
    out.push_str("</div>");
    out
}

pub fn render_languages(languages: &[LanguageSkill]) -> String {
    render_each(languages, |out, lang| {
        let name = match &lang.flag {
            Some(flag) => format!("{flag} {}", lang.name),
            None => lang.name.clone(),
        };
        let gap = if lang.detail.is_some() { "0.5rem" } else { "0" };
        let _ = write!(
            out,
            r#"<div class="card language-card"><div class="language-content"><h3 style="font-size: 1.25rem; margin-bottom: 0.5rem;">{name}</h3><p style="color: var(--text-light); margin-bottom: {gap};">{}</p>"#,
            lang.level
        );
        if let Some(detail) = &lang.detail {
            let _ = write!(
                out,
                r#"<p style="font-size: 0.875rem; color: var(--text-light);">{detail}</p>"#
            );
        }
        // Width starts at the target; the runtime script animates from 0
        let _ = write!(
            out,
            r#"</div><div class="language-bar"><div class="language-fill" style="width: {}%;"></div></div></div>"#,
            lang.percentage.clamp(0.0, 100.0)
        );
    })
}

pub fn render_interests(interests: &[Interest]) -> String {
    render_each(interests, |out, interest| {
        let _ = write!(
            out,
            r#"<div class="interest-card card"><div class="interest-icon">{}</div><h3 class="interest-title">{}</h3><p class="interest-description">{}</p></div>"#,
            interest.icon.as_deref().unwrap_or_default(),
            interest.title,
            interest.description
        );
    })
}

/// One card per present channel, in email, LinkedIn, GitHub, CV order.
pub fn render_contact_cards(social: &Social) -> String {
    let mut out = String::new();
    if let Some(email) = &social.email {
        let _ = write!(
            out,
            r#"<a href="mailto:{address}" class="card contact-card"><div class="contact-icon">{}</div><h3>Email</h3><p>{address}</p></a>"#,
            email.icon,
            address = email.address,
        );
    }
    for (label, channel) in [("LinkedIn", &social.linkedin), ("GitHub", &social.github)] {
        if let Some(channel) = channel {
            let _ = write!(
                out,
                r#"<a href="{}" target="_blank" class="card contact-card"><div class="contact-icon">{}</div><h3>{label}</h3><p>@{}</p></a>"#,
                channel.url, channel.icon, channel.username
            );
        }
    }
    if let Some(cv) = &social.cv {
        let _ = write!(
            out,
            r#"<a href="{}" target="_blank" class="card contact-card" download><div class="contact-icon">{}</div><h3>CV</h3><p>Download CV</p></a>"#,
            cv.url, cv.icon
        );
    }
    out
}

pub fn render_cta(cta: &Cta) -> String {
    let mut out = String::with_capacity(512);
    let _ = write!(
        out,
        r#"<div class="cta-content"><h2>{}</h2><p>{}</p><div class="cta-buttons"><a href="{}" class="btn btn-white">{}</a>"#,
        cta.title, cta.description, cta.primary_button.href, cta.primary_button.text
    );
    if let Some(secondary) = &cta.secondary_button {
        let target = if secondary.external {
            r#" target="_blank""#
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<a href="{}"{target} class="btn cta-btn-secondary">{}</a>"#,
            secondary.href, secondary.text
        );
    }
    out.push_str("</div></div>");
    out
}
