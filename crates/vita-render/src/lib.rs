//! Rendering core: citation formatting and timeline grouping.
//!
//! Turns portfolio data records into HTML fragments. Two pieces carry the
//! actual logic:
//!
//! - [`citation`]: segments a publication record (free-text or structured)
//!   into authors/year/title/venue, emphasizes the primary author, attaches
//!   action links and metric badge placeholders.
//! - [`timeline`]: groups heterogeneous entries by time label, sorts labels
//!   by recency with special-cased tokens ("Present", "In preparation"),
//!   and renders grouped or flat lists.
//!
//! Everything in this crate is a pure function over its inputs: no I/O, no
//! logging, no shared state. Parsing is best-effort by design — a record
//! that defies every heuristic still renders, unsegmented.

mod author;
mod citation;
mod doi;
mod education;
mod escape;
mod press;
mod timeline;

pub use author::AuthorEmphasis;
pub use citation::{CitationParts, RenderedItem, format_publication, parse_citation};
pub use doi::extract_doi;
pub use education::{EducationSplit, split_education_entry};
pub use escape::escape_html;
pub use press::{PressLink, PressTable};
pub use timeline::{
    TimelineGroup, flatten_and_sort, group_and_sort, render_flat, render_grouped, sort_value,
};
