//! The page populator.

use vita_data::{SiteData, TimedEntry, TimelineEntry};
use vita_render::{
    AuthorEmphasis, PressTable, escape_html, flatten_and_sort, format_publication, group_and_sort,
    render_flat, render_grouped,
};

use crate::regions::replace_region;
use crate::sections;

/// Populates a template page from a data document.
///
/// Holds the derived render configuration (author emphasis patterns and
/// the press-link table) so that repeated population — for example on a
/// navigation signal — reuses the same value instead of reaching for any
/// ambient state. [`populate`](Self::populate) is idempotent and safe to
/// invoke any number of times.
#[derive(Debug)]
pub struct Populator {
    author: AuthorEmphasis,
    press: PressTable,
}

impl Populator {
    /// Create a populator with the given author emphasis and press table.
    #[must_use]
    pub fn new(author: AuthorEmphasis, press: PressTable) -> Self {
        Self { author, press }
    }

    /// Populate every known region of `template` from `data`.
    ///
    /// With `None` (data unavailable) the template passes through
    /// unchanged. Regions absent from the template are skipped; sections
    /// without data leave their placeholder content in place. No failure
    /// in this path escapes to the caller.
    #[must_use]
    pub fn populate(&self, template: &str, data: Option<&SiteData>) -> String {
        let mut page = template.to_owned();
        let Some(data) = data else {
            tracing::debug!("no data document; leaving template untouched");
            return page;
        };

        if let Some(name) = &data.name {
            let name_html = escape_html(name);
            for id in ["hero-name", "footer-name", "brand"] {
                apply(&mut page, id, Some(name_html.clone()));
            }
        }
        apply(&mut page, "hero-tagline", data.tagline.clone());
        apply(&mut page, "hero-links", sections::hero_links(data));
        apply(&mut page, "home-summary", data.summary.clone());
        apply(&mut page, "home-keywords", sections::keyword_chips(&data.interests));
        apply(
            &mut page,
            "home-education",
            sections::education_block(&data.education),
        );
        apply(
            &mut page,
            "about-content",
            data.about.as_deref().map(sections::about_content),
        );
        apply(&mut page, "about-extra", Some(sections::about_extra(data)));
        apply(
            &mut page,
            "featured-cards",
            sections::featured_cards(&data.featured),
        );
        apply(&mut page, "contact", sections::contact(data));
        apply(
            &mut page,
            "hero-photo",
            data.photo
                .as_deref()
                .map(|photo| sections::hero_photo(photo, data.name.as_deref())),
        );

        if !data.publications.is_empty() {
            let entries: Vec<TimelineEntry> = data
                .publications
                .iter()
                .map(|publication| {
                    let item = format_publication(publication, &self.author, &self.press);
                    TimelineEntry::Timed(TimedEntry {
                        times: item.time_label.into_iter().collect(),
                        time: None,
                        text: item.html,
                    })
                })
                .collect();
            timeline(&mut page, "pub-list", &entries);
        }
        timeline_section(&mut page, "awards-list", &data.awards);
        timeline_section(&mut page, "teaching-list", &data.teaching);
        timeline_section(&mut page, "talks-list", &data.talks);

        page
    }
}

/// Replace one region when both the content and the region exist.
fn apply(page: &mut String, id: &str, content: Option<String>) {
    let Some(content) = content else { return };
    if !replace_region(page, id, &content) {
        tracing::debug!(region = id, "region not present; section skipped");
    }
}

/// Render a timeline into its grouped region and its flat `-mobile`
/// counterpart.
fn timeline(page: &mut String, id: &str, entries: &[TimelineEntry]) {
    let grouped = render_grouped(&group_and_sort(entries));
    apply(page, id, Some(grouped));
    let flat = render_flat(&flatten_and_sort(entries));
    apply(page, &format!("{id}-mobile"), Some(flat));
}

/// Timeline section fed directly from document entries.
fn timeline_section(page: &mut String, id: &str, entries: &[TimelineEntry]) {
    if entries.is_empty() {
        return;
    }
    timeline(page, id, entries);
}
