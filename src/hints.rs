//! Parser-independent hints over normalized SQL text.
//!
//! A coarse first pass: plain substring checks on the uppercased text with
//! whitespace runs collapsed. Overlap with rule findings is expected.

use smallvec::SmallVec;

/// Ordered hint messages; rarely more than four
pub type Hints = SmallVec<[String; 4]>;

const SELECT_STAR: &str = "Avoid SELECT *: project only the columns you need.";
const CASE_FUNCTION: &str =
    "Avoid functions on filtered columns; use functional indexes or normalize the data.";
const IN_LIST: &str = "Consider replacing IN with a JOIN or EXISTS for large lists.";
const DISTINCT: &str = "Check whether DISTINCT is necessary; it may mask duplicates from JOINs.";

/// Compute baseline hints for any text. Never fails.
///
/// # Example
///
/// ```
/// use sql_advisor::hints::baseline_hints;
///
/// let hints = baseline_hints("select *\nfrom t where id in (1, 2)");
/// assert_eq!(hints.len(), 2);
/// assert!(baseline_hints("").is_empty());
/// ```
pub fn baseline_hints(normalized: &str) -> Hints {
    let text = collapse_whitespace(normalized).to_uppercase();
    let mut hints = Hints::new();
    if text.contains("SELECT *") {
        hints.push(SELECT_STAR.to_string());
    }
    if text.contains("LOWER(") || text.contains("UPPER(") {
        hints.push(CASE_FUNCTION.to_string());
    }
    if text.contains("IN (") && text.contains(',') {
        hints.push(IN_LIST.to_string());
    }
    if text.contains("DISTINCT") {
        hints.push(DISTINCT.to_string());
    }
    hints
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
