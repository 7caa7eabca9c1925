//! Search Logic
//!
//! Pure functions for filtering the account list by a search query.

use crate::model::Account;

/// Match a query against an account's name and issuer
///
/// # Rules
/// - The query is trimmed and lowercased; an empty query matches everything
/// - Matches are case-insensitive substrings of `"{name} {issuer}"`
///
/// # Examples
/// ```
/// use authtui::logic::search::text_matches;
///
/// assert!(text_matches("hub", "alice GitHub"));
/// assert!(text_matches("  ", "anything"));
/// assert!(!text_matches("lab", "alice GitHub"));
/// ```
pub fn text_matches(query: &str, haystack: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&query)
}

/// Whether an account is shown under `query`
pub fn account_matches(account: &Account, query: &str) -> bool {
    text_matches(query, &format!("{} {}", account.name, account.issuer))
}

/// Which placeholder panel the list area shows, if any
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListPlaceholder {
    /// No accounts at all
    Empty,
    /// Accounts exist but none match a non-empty query
    NoResults,
}

/// Decide between the list, the empty state and the no-results state
pub fn placeholder(total: usize, visible: usize, query: &str) -> Option<ListPlaceholder> {
    if total == 0 {
        Some(ListPlaceholder::Empty)
    } else if visible == 0 && !query.trim().is_empty() {
        Some(ListPlaceholder::NoResults)
    } else {
        None
    }
}
