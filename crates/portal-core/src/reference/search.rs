use std::collections::HashSet;

use crate::catalog::Candidate;
use crate::id::EntityId;

/// Candidates matching a query, evaluated lazily.
///
/// Iterating does not consume the result; [`Matches::iter`] can be called any
/// number of times and always yields the matches in candidate-list order.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    candidates: &'a [Candidate],
    /// Lowercased query; `None` when the query is blank.
    needle: Option<String>,
    excluded: HashSet<EntityId>,
}

/// Filters `candidates` by case-insensitive substring match on the label.
///
/// A blank query matches nothing. Candidates whose id is in `already_selected`
/// are skipped.
pub fn search<'a, 'b>(
    candidates: &'a [Candidate],
    query: &str,
    already_selected: impl IntoIterator<Item = &'b EntityId>,
) -> Matches<'a> {
    let needle = if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    };

    Matches {
        candidates,
        needle,
        excluded: already_selected.into_iter().cloned().collect(),
    }
}

impl<'a> Matches<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Candidate> + '_ {
        self.candidates
            .iter()
            .filter(move |candidate| self.accepts(candidate))
    }

    fn accepts(&self, candidate: &Candidate) -> bool {
        let Some(needle) = &self.needle else {
            return false;
        };
        !self.excluded.contains(&candidate.id) && candidate.label.to_lowercase().contains(needle)
    }

    /// The topmost match.
    pub fn first(&self) -> Option<&'a Candidate> {
        self.iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    pub fn to_vec(&self) -> Vec<Candidate> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("1", "Abacus"),
            Candidate::new("2", "java"),
            Candidate::new("3", "JavaScript"),
        ]
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let candidates = candidates();
        assert!(search(&candidates, "", []).is_empty());
        assert!(search(&candidates, "   ", []).is_empty());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let candidates = vec![Candidate::new("1", "Abacus"), Candidate::new("2", "java")];
        let matches = search(&candidates, "ab", []);
        assert_eq!(matches.to_vec(), vec![Candidate::new("1", "Abacus")]);
    }

    #[test]
    fn test_preserves_order_and_excludes_selected() {
        let candidates = candidates();
        let selected = [EntityId::from("2")];

        let matches = search(&candidates, "JAVA", &selected);
        let ids: Vec<&str> = matches.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);

        let matches = search(&candidates, "a", []);
        let ids: Vec<&str> = matches.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_matches_are_restartable() {
        let candidates = candidates();
        let matches = search(&candidates, "java", []);
        assert_eq!(matches.iter().count(), 2);
        assert_eq!(matches.iter().count(), 2);
        assert_eq!(matches.first().map(|c| c.label.as_str()), Some("java"));
    }
}
