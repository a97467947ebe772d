//! Section discovery: locating (identifier, amount) column pairs.

use crate::config::ReconConfig;

/// An (identifier, amount) column pair found in a header row.
///
/// The amount column is always `id_col + 1`; sections exist only where
/// the two headers are immediately adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id_col: usize,
    pub amount_col: usize,
}

/// Scan a header row left to right for sections.
///
/// A header containing the id marker (case-sensitive substring) whose
/// immediately following header contains the amount marker yields one
/// section. An id-like header without a qualifying neighbor is skipped
/// silently. Headers are never matched by name similarity, only by
/// adjacency.
#[must_use]
pub fn find_sections(headers: &[String], cfg: &ReconConfig) -> Vec<Section> {
    let mut sections = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        if !header.contains(&cfg.id_marker) {
            continue;
        }
        if let Some(next) = headers.get(i + 1) {
            if next.contains(&cfg.amount_marker) {
                sections.push(Section {
                    id_col: i,
                    amount_col: i + 1,
                });
            }
        }
    }
    sections
}
