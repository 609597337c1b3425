//! Per-section markup builders.
//!
//! Each builder derives the HTML for one region from the data document.
//! Builders returning `Option` yield `None` when the section has no data,
//! which leaves the template's static placeholder in place. Fields whose
//! contract allows markup (tagline, summary, about, timeline bodies) pass
//! through unescaped; everything else is escaped.

use std::fmt::Write;

use vita_data::{FeaturedCard, SiteData};
use vita_render::{escape_html, split_education_entry};

/// Hero contact row: mailto link plus external profile links.
pub(crate) fn hero_links(data: &SiteData) -> Option<String> {
    if data.email.is_none() && data.profiles.is_empty() {
        return None;
    }

    let mut html = String::new();
    if let Some(email) = &data.email {
        let _ = write!(
            html,
            r#"<a href="mailto:{0}"><img src="assets/img/mail.svg" alt="Email" class="icon" aria-hidden="true" />{0}</a>"#,
            escape_html(email)
        );
    }
    for profile in &data.profiles {
        let Some(url) = &profile.url else { continue };
        let label = profile.label.as_deref().unwrap_or("Profile");
        let icon = profile.icon.as_deref().map_or_else(String::new, |icon| {
            format!(
                r#"<img src="{}" alt="{}" class="icon" aria-hidden="true" />"#,
                escape_html(icon),
                escape_html(label)
            )
        });
        let _ = write!(
            html,
            r#"<a href="{}" target="_blank" rel="noopener">{}{}</a>"#,
            escape_html(url),
            icon,
            escape_html(label)
        );
    }
    Some(html)
}

/// Interest keywords as chips.
pub(crate) fn keyword_chips(interests: &[String]) -> Option<String> {
    if interests.is_empty() {
        return None;
    }
    let chips: Vec<String> = interests
        .iter()
        .map(|keyword| format!(r#"<span class="chip">{}</span>"#, escape_html(keyword)))
        .collect();
    Some(chips.concat())
}

/// Home education block: heading plus a styled list with the year
/// component split out of each entry.
pub(crate) fn education_block(education: &[String]) -> Option<String> {
    if education.is_empty() {
        return None;
    }

    let mut html = String::from(r#"<h2>Education</h2><ul class="edu-list">"#);
    for entry in education {
        let split = split_education_entry(entry);
        let years_html = split.years.map_or_else(String::new, |years| {
            format!(r#"<div class="edu-years">{}</div>"#, escape_html(&years))
        });
        let text = if split.text.is_empty() {
            entry.as_str()
        } else {
            &split.text
        };
        let _ = write!(
            html,
            r#"<li><span class="edu-bullet"></span><div class="edu-item">{}<div class="edu-text">{}</div></div></li>"#,
            years_html,
            escape_html(text)
        );
    }
    html.push_str("</ul>");
    Some(html)
}

/// About page paragraph. The text may contain markup.
pub(crate) fn about_content(about: &str) -> String {
    format!("<p>{about}</p>")
}

/// Secondary about block: plain education and interest lists.
///
/// Always rendered when the region exists; with no data it clears the
/// placeholder, matching a wholesale replacement contract.
pub(crate) fn about_extra(data: &SiteData) -> String {
    let mut parts = String::new();
    if !data.education.is_empty() {
        parts.push_str("<h2>Education</h2><ul>");
        for entry in &data.education {
            let _ = write!(parts, "<li>{}</li>", escape_html(entry));
        }
        parts.push_str("</ul>");
    }
    if !data.interests.is_empty() {
        parts.push_str("<h2>Interests</h2><ul>");
        for interest in &data.interests {
            let _ = write!(parts, "<li>{}</li>", escape_html(interest));
        }
        parts.push_str("</ul>");
    }
    parts
}

/// Featured press/outreach cards.
pub(crate) fn featured_cards(cards: &[FeaturedCard]) -> Option<String> {
    if cards.is_empty() {
        return None;
    }

    let mut html = String::new();
    for card in cards {
        let title = card.title.as_deref().unwrap_or("");
        let url = card.url.as_deref().unwrap_or("#");
        let source = card.source.as_deref().unwrap_or("");
        let kicker = card.kicker.as_deref().unwrap_or("Link");

        let media = card.image.as_deref().map_or_else(
            || r#"<div class="card-media" aria-hidden="true"></div>"#.to_owned(),
            |image| {
                format!(
                    r#"<div class="card-media"><img src="{}" alt="{}" loading="lazy" referrerpolicy="no-referrer" onerror="this.remove()"/></div>"#,
                    escape_html(image),
                    escape_html(title)
                )
            },
        );

        let _ = write!(
            html,
            r#"<a class="card" href="{}" target="_blank" rel="noopener noreferrer">{}<div class="card-body"><div class="card-kicker">{}</div><h3 class="card-title">{}</h3><div class="card-source">{}</div></div></a>"#,
            escape_html(url),
            media,
            escape_html(kicker),
            escape_html(title),
            escape_html(source)
        );
    }
    Some(html)
}

/// Contact section: email and location.
pub(crate) fn contact(data: &SiteData) -> Option<String> {
    if data.email.is_none() && data.location.is_none() {
        return None;
    }

    let mut html = String::from(r#"<ul class="contact-list">"#);
    if let Some(email) = &data.email {
        let _ = write!(
            html,
            r#"<li><a href="mailto:{0}">{0}</a></li>"#,
            escape_html(email)
        );
    }
    if let Some(location) = &data.location {
        let _ = write!(
            html,
            r#"<li><span class="contact-location">{}</span></li>"#,
            escape_html(location)
        );
    }
    html.push_str("</ul>");
    Some(html)
}

/// Hero photo image.
pub(crate) fn hero_photo(photo: &str, name: Option<&str>) -> String {
    format!(
        r#"<img class="hero-photo" src="{}" alt="{}" />"#,
        escape_html(photo),
        escape_html(name.unwrap_or(""))
    )
}
