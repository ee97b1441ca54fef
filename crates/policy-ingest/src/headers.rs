//! Header row handling.
//!
//! Header text is kept verbatim, including embedded newlines and padding,
//! because mappings match on the exact text. Only blank and repeated headers
//! are renamed so that every column has a unique name.

use std::collections::HashSet;

/// Name given to a blank header cell at `index`.
pub fn unnamed_header(index: usize) -> String {
    format!("Unnamed: {index}")
}

/// Makes header names unique and non-empty.
///
/// Blank headers become `Unnamed: <index>`; a repeated header gets `.1`,
/// `.2`, ... appended in order of appearance.
pub fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let name = if name.trim().is_empty() {
            unnamed_header(idx)
        } else {
            name
        };
        let unique = if seen.contains(&name) {
            let mut suffix = 1usize;
            loop {
                let candidate = format!("{name}.{suffix}");
                if !seen.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            }
        } else {
            name
        };
        seen.insert(unique.clone());
        headers.push(unique);
    }
    headers
}
