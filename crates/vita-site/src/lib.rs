//! Page population: named regions and section builders.
//!
//! A template page marks its insertion points with comment pairs:
//!
//! ```html
//! <ul id="pub-list"><!-- vita:pub-list --><li>static placeholder</li><!-- /vita:pub-list --></ul>
//! ```
//!
//! [`Populator::populate`] replaces the content between each known pair
//! with markup derived from the data document, leaving the markers in
//! place so that re-population is byte-stable. Everything degrades
//! silently: absent data leaves the template untouched, an absent region
//! skips that section, and a record no heuristic can segment still
//! renders as raw text. Nothing in this layer is surfaced to the page.

mod populate;
mod regions;
mod sections;

pub use populate::Populator;
pub use regions::{has_region, replace_region};
