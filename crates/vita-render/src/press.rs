//! Press-link lookup table.
//!
//! Some papers have associated press coverage that is attached as extra
//! action links beneath the citation. Which paper gets which link is
//! editorial content, not logic, so it lives in a lookup table of
//! title-pattern → links. The built-in table carries the site's current
//! coverage; a configuration file can replace it without code changes.

use std::sync::LazyLock;

use regex::Regex;

/// One extra action link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PressLink {
    /// Visible button label.
    pub label: String,
    /// Link target.
    pub url: String,
}

impl PressLink {
    /// Convenience constructor.
    #[must_use]
    pub fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_owned(),
            url: url.to_owned(),
        }
    }
}

/// A single title-pattern rule with its links.
#[derive(Clone, Debug)]
struct PressRule {
    pattern: Regex,
    links: Vec<PressLink>,
}

/// Lookup table mapping publication titles to extra press links.
#[derive(Clone, Debug, Default)]
pub struct PressTable {
    rules: Vec<PressRule>,
}

static BUILT_IN: LazyLock<PressTable> = LazyLock::new(|| {
    let rules = vec![
        (
            r"(?i)Neglecting\s+future\s+sporadic\s+volcanic\s+eruptions\s+underestimates\s+climate\s+uncertainty",
            vec![PressLink::new(
                "Carbon Brief",
                "https://www.carbonbrief.org/guest-post-investigating-how-volcanic-eruptions-can-affect-climate-projections/",
            )],
        ),
        (
            r"(?i)Climate\s+projections\s+very\s+likely\s+underestimate\s+future\s+volcanic\s+forcing",
            vec![
                PressLink::new(
                    "Press Release",
                    "https://www.cam.ac.uk/research/news/effect-of-volcanic-eruptions-significantly-underestimated-in-climate-projections",
                ),
                PressLink::new(
                    "Research Spotlight",
                    "https://eos.org/research-spotlights/volcanoes-future-climate-effects-may-exceed-standard-estimates",
                ),
            ],
        ),
        (
            r"(?i)Waste\s*[-‑–—]?to\s*[-‑–—]?Energy",
            vec![PressLink::new(
                "Press Release",
                "https://www.unep.org/news-and-stories/story/rummaging-through-trash-find-clean-energy",
            )],
        ),
    ];
    let rules = rules
        .into_iter()
        .map(|(pattern, links)| PressRule {
            pattern: Regex::new(pattern).unwrap(),
            links,
        })
        .collect();
    PressTable { rules }
});

impl PressTable {
    /// The built-in table.
    #[must_use]
    pub fn built_in() -> Self {
        BUILT_IN.clone()
    }

    /// An empty table (no extra links for any title).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from (pattern, links) pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if a pattern does not compile.
    pub fn from_rules(
        rules: impl IntoIterator<Item = (String, Vec<PressLink>)>,
    ) -> Result<Self, regex::Error> {
        let rules = rules
            .into_iter()
            .map(|(pattern, links)| {
                Ok(PressRule {
                    pattern: Regex::new(&pattern)?,
                    links,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Links for a publication title: the first matching rule wins.
    #[must_use]
    pub fn links_for(&self, title: &str) -> &[PressLink] {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(title))
            .map_or(&[], |rule| rule.links.as_slice())
    }
}
