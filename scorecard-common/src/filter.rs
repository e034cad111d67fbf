//! Filter and search over loaded records
//!
//! All active criteria must hold (logical AND). An absent criterion does not
//! constrain. Empty results are not an error.

use tracing::debug;

use crate::model::{PaperRecord, Status};

/// Query key for the lower score bound
pub const KEY_MIN: &str = "min";
/// Query key for the upper score bound
pub const KEY_MAX: &str = "max";
pub const KEY_STATUS: &str = "status";
pub const KEY_CONFERENCE: &str = "conference";
pub const KEY_SEARCH: &str = "q";

/// User-selected filter criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive lower bound on the normalized score
    pub min_score: Option<f64>,
    /// Inclusive upper bound on the normalized score
    pub max_score: Option<f64>,
    /// Allowed statuses; `Some(empty)` allows none
    pub statuses: Option<Vec<Status>>,
    /// Allowed conference tags; `Some(empty)` allows none
    pub conferences: Option<Vec<String>>,
    /// Case-insensitive substring of title or paper id
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from URL query pairs
    ///
    /// Any `status` / `conference` key activates that list, so a lone blank
    /// value (the HTML form's hidden field) means "none selected". Numbers
    /// that fail to parse leave their bound inactive. Unknown status labels
    /// are dropped, so asking only for unknown statuses matches nothing.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let mut criteria = FilterCriteria::default();
        let mut statuses: Option<Vec<Status>> = None;
        let mut conferences: Option<Vec<String>> = None;

        for (key, value) in pairs {
            match key.as_str() {
                KEY_MIN => criteria.min_score = parse_bound(key, value),
                KEY_MAX => criteria.max_score = parse_bound(key, value),
                KEY_STATUS => {
                    let list = statuses.get_or_insert_with(Vec::new);
                    if value.trim().is_empty() {
                        continue;
                    }
                    match value.parse::<Status>() {
                        Ok(status) if !list.contains(&status) => list.push(status),
                        Ok(_) => {}
                        Err(e) => debug!("Ignoring status filter: {}", e),
                    }
                }
                KEY_CONFERENCE => {
                    let list = conferences.get_or_insert_with(Vec::new);
                    let tag = value.trim();
                    if !tag.is_empty() && !list.iter().any(|c| c == tag) {
                        list.push(tag.to_string());
                    }
                }
                KEY_SEARCH => {
                    let term = value.trim();
                    criteria.search = (!term.is_empty()).then(|| term.to_string());
                }
                _ => {}
            }
        }

        criteria.statuses = statuses;
        criteria.conferences = conferences;
        criteria
    }

    /// Query pairs that reproduce these criteria
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(min) = self.min_score {
            pairs.push((KEY_MIN.to_string(), min.to_string()));
        }
        if let Some(max) = self.max_score {
            pairs.push((KEY_MAX.to_string(), max.to_string()));
        }
        match &self.statuses {
            Some(statuses) if statuses.is_empty() => {
                pairs.push((KEY_STATUS.to_string(), String::new()));
            }
            Some(statuses) => pairs.extend(
                statuses
                    .iter()
                    .map(|s| (KEY_STATUS.to_string(), s.label().to_string())),
            ),
            None => {}
        }
        match &self.conferences {
            Some(conferences) if conferences.is_empty() => {
                pairs.push((KEY_CONFERENCE.to_string(), String::new()));
            }
            Some(conferences) => pairs.extend(
                conferences
                    .iter()
                    .map(|c| (KEY_CONFERENCE.to_string(), c.clone())),
            ),
            None => {}
        }
        if let Some(term) = &self.search {
            pairs.push((KEY_SEARCH.to_string(), term.clone()));
        }
        pairs
    }

    /// True when no criterion constrains anything
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Whether a status is allowed (for pre-checking form boxes)
    pub fn allows_status(&self, status: Status) -> bool {
        self.statuses
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&status))
    }

    /// Whether a conference is allowed (for pre-checking form boxes)
    pub fn allows_conference(&self, conference: &str) -> bool {
        self.conferences
            .as_ref()
            .map_or(true, |allowed| allowed.iter().any(|c| c == conference))
    }

    /// Test one record against every active criterion
    pub fn matches(&self, record: &PaperRecord) -> bool {
        if let Some(min) = self.min_score {
            if record.normalized_score < min {
                return false;
            }
        }
        if let Some(max) = self.max_score {
            if record.normalized_score > max {
                return false;
            }
        }
        if !self.allows_status(record.status) {
            return false;
        }
        if !self.allows_conference(&record.conference) {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !record.title.to_lowercase().contains(&term)
                && !record.paper_id.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

fn parse_bound(key: &str, value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(bound) if bound.is_finite() => Some(bound),
        _ => {
            debug!("Ignoring unparseable {} bound '{}'", key, value);
            None
        }
    }
}

/// Records satisfying all criteria, in original order
pub fn apply<'a>(records: &'a [PaperRecord], criteria: &FilterCriteria) -> Vec<&'a PaperRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Distinct statuses present, in first-seen order
pub fn distinct_statuses(records: &[PaperRecord]) -> Vec<Status> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.status) {
            seen.push(record.status);
        }
    }
    seen
}

/// Distinct conference tags present, in first-seen order
pub fn distinct_conferences(records: &[PaperRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !seen.iter().any(|c| *c == record.conference) {
            seen.push(record.conference.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RubricScores;
    use crate::scoring::{normalized_score, status_from_score};

    fn record(id: &str, ratings: [u8; 4], conference: &str) -> PaperRecord {
        let rubric = RubricScores::new(ratings).unwrap();
        let score = normalized_score(&rubric);
        PaperRecord {
            paper_id: id.to_string(),
            title: id.replace('_', " "),
            rubric,
            normalized_score: score,
            status: status_from_score(score),
            conference: conference.to_string(),
            notes: String::new(),
            repo_url: None,
            paper_url: None,
            criteria: Vec::new(),
        }
    }

    fn sample() -> Vec<PaperRecord> {
        vec![
            record("LLM_Code_Search", [4, 4, 4, 4], "ICSE 2023"),
            record("Bug_Triage", [2, 2, 2, 2], "SC24"),
            record("Test_Gen", [1, 1, 1, 1], "ICSE 2023"),
            record("Code_Review_Bots", [4, 4, 3, 4], "SC24"),
        ]
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ids(found: &[&PaperRecord]) -> Vec<String> {
        found.iter().map(|r| r.paper_id.clone()).collect()
    }

    #[test]
    fn test_no_criteria_returns_everything() {
        let records = sample();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unconstrained());
        assert_eq!(apply(&records, &criteria).len(), 4);
    }

    #[test]
    fn test_score_range_inclusive() {
        let records = sample();
        let criteria = FilterCriteria {
            min_score: Some(50.0),
            max_score: Some(93.75),
            ..Default::default()
        };
        assert_eq!(
            ids(&apply(&records, &criteria)),
            vec!["Bug_Triage", "Code_Review_Bots"]
        );
    }

    #[test]
    fn test_score_range_matches_exact_subset() {
        let records = sample();
        for (lo, hi) in [(0.0, 100.0), (25.0, 25.0), (26.0, 49.0), (60.0, 10.0)] {
            let criteria = FilterCriteria {
                min_score: Some(lo),
                max_score: Some(hi),
                ..Default::default()
            };
            let expected: Vec<&PaperRecord> = records
                .iter()
                .filter(|r| r.normalized_score >= lo && r.normalized_score <= hi)
                .collect();
            assert_eq!(apply(&records, &criteria), expected);
        }
    }

    #[test]
    fn test_search_case_insensitive_on_title_and_id() {
        let records = sample();
        let criteria = FilterCriteria {
            search: Some("CODE".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&apply(&records, &criteria)),
            vec!["LLM_Code_Search", "Code_Review_Bots"]
        );

        let by_id = FilterCriteria {
            search: Some("bug_tri".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &by_id)), vec!["Bug_Triage"]);
    }

    #[test]
    fn test_search_idempotent() {
        let records = sample();
        let criteria = FilterCriteria {
            search: Some("test".to_string()),
            ..Default::default()
        };
        let first = apply(&records, &criteria);
        let second = apply(&records, &criteria);
        assert_eq!(first, second);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let records = sample();
        let criteria = FilterCriteria {
            statuses: Some(vec![Status::HighlyReproducible]),
            conferences: Some(vec!["SC24".to_string()]),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &criteria)), vec!["Code_Review_Bots"]);
    }

    #[test]
    fn test_empty_result_is_not_error() {
        let records = sample();
        let criteria = FilterCriteria {
            search: Some("nothing like this".to_string()),
            ..Default::default()
        };
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn test_from_query_pairs() {
        let criteria = FilterCriteria::from_query_pairs(&pairs(&[
            ("min", "40"),
            ("max", "abc"),
            ("status", "Highly Reproducible"),
            ("status", "issues present"),
            ("status", "Highly Reproducible"),
            ("conference", "SC24"),
            ("q", "  llm "),
            ("page", "2"),
        ]));
        assert_eq!(criteria.min_score, Some(40.0));
        assert_eq!(criteria.max_score, None);
        assert_eq!(
            criteria.statuses,
            Some(vec![Status::HighlyReproducible, Status::IssuesPresent])
        );
        assert_eq!(criteria.conferences, Some(vec!["SC24".to_string()]));
        assert_eq!(criteria.search.as_deref(), Some("llm"));
    }

    #[test]
    fn test_form_with_nothing_checked_matches_nothing() {
        let records = sample();
        let criteria = FilterCriteria::from_query_pairs(&pairs(&[("status", ""), ("conference", "")]));
        assert_eq!(criteria.statuses, Some(Vec::new()));
        assert_eq!(criteria.conferences, Some(Vec::new()));
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn test_unknown_status_matches_nothing() {
        let records = sample();
        let criteria = FilterCriteria::from_query_pairs(&pairs(&[("status", "Mostly Fine")]));
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn test_query_pairs_round_trip_preserves_criteria() {
        let criteria = FilterCriteria {
            min_score: Some(12.5),
            statuses: Some(vec![Status::NotReproducible]),
            conferences: Some(Vec::new()),
            search: Some("bots".to_string()),
            ..Default::default()
        };
        let rebuilt = FilterCriteria::from_query_pairs(&criteria.to_query_pairs());
        assert_eq!(rebuilt, criteria);
    }

    #[test]
    fn test_distinct_options_in_first_seen_order() {
        let records = sample();
        assert_eq!(distinct_conferences(&records), vec!["ICSE 2023", "SC24"]);
        assert_eq!(
            distinct_statuses(&records),
            vec![
                Status::HighlyReproducible,
                Status::PartiallyReproducible,
                Status::IssuesPresent
            ]
        );
    }
}
