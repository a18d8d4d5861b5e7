//! # Scraping "specs" module
//!
//! Page-specific scraping specifications. A spec knows *where the ground truth
//! lives in the HTML* of one page and how to turn it into typed records.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the remote page (`parse_doc`), testable offline
//!   against captured fixtures.
//! - **Selector choice**: which tables count, which rows to skip (the `Totals`
//!   footer), which cells carry the numbers.
//! - **Light shaping** of results into `CaseRecord`s, one per date, ascending.
//!
//! ## What does **not** live here
//! - Persistence and merging (`store`).
//! - Chart rendering (`chart`) and mailing (`notify`).
//!
//! ## Typical call chain
//! ```text
//! runner → specs::dashboard::fetch() → core::net::http_get
//!                                  ↘  parse_doc → Vec<CaseRecord>
//!          store::History::merge (outside of specs)
//! ```
//!
//! ## Conventions
//! - Structure mismatches are errors, not silent empties: a run with missing
//!   tables or unreadable cells must not overwrite good history with nothing.
//! - Cell text is whitespace-normalized before any interpretation.
pub mod dashboard;
