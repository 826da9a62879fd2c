//! Structural validation before any computation.
//!
//! The engine assumes validated input. This stage is where that assumption
//! is earned: any Error-severity issue stops the pipeline before reallocation.
//! Issues are sorted (code, where, message) so repeated runs report identically.

use std::collections::{BTreeSet, HashSet};

use pz_core::{EngineParams, EventBallots, PizzaOptionId, VoteRecord, VoterId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityRef {
    Root,
    Option(PizzaOptionId),
    Vote(VoterId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

/// pass = no Error-severity issue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }
}

pub fn validate(input: &EventBallots, params: &EngineParams) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    let catalog_ids = check_catalog(input, &mut issues);

    if input.votes.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            code: "Vote.None",
            message: "no votes were cast".to_string(),
            where_: EntityRef::Root,
        });
    }

    let mut seen_voters: HashSet<&VoterId> = HashSet::new();
    for v in &input.votes {
        if !seen_voters.insert(&v.voter_id) {
            issues.push(error("Vote.DuplicateVoter", format!("voter {} voted more than once", v.voter_id), v));
        }
        check_vote(v, &catalog_ids, params, &mut issues);
    }

    issues.sort_by(|a, b| {
        a.code
            .cmp(b.code)
            .then_with(|| a.where_.cmp(&b.where_))
            .then_with(|| a.message.cmp(&b.message))
    });

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

fn check_catalog<'a>(input: &'a EventBallots, issues: &mut Vec<ValidationIssue>) -> HashSet<&'a PizzaOptionId> {
    if input.catalog.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            code: "Catalog.Empty",
            message: "event has no pizza options".to_string(),
            where_: EntityRef::Root,
        });
    }
    let mut ids = HashSet::new();
    for e in &input.catalog {
        if !ids.insert(&e.id) {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                code: "Catalog.DuplicateId",
                message: format!("pizza option {} listed more than once", e.id),
                where_: EntityRef::Option(e.id.clone()),
            });
        }
    }
    ids
}

fn check_vote(
    v: &VoteRecord,
    catalog_ids: &HashSet<&PizzaOptionId>,
    params: &EngineParams,
    issues: &mut Vec<ValidationIssue>,
) {
    if !(params.min_slice_count..=params.max_slice_count).contains(&v.slice_count) {
        issues.push(error(
            "Vote.SliceCountOutOfRange",
            format!(
                "slice count {} outside {}..={}",
                v.slice_count, params.min_slice_count, params.max_slice_count
            ),
            v,
        ));
    }

    if v.choices.is_empty() {
        issues.push(error("Vote.NoChoices", "vote ranks no pizza".to_string(), v));
        return;
    }
    if v.choices.len() > params.max_choices {
        issues.push(error(
            "Vote.TooManyChoices",
            format!("{} choices ranked, at most {} allowed", v.choices.len(), params.max_choices),
            v,
        ));
    }

    // Priorities must be exactly 1..=n.
    let priorities: BTreeSet<u8> = v.choices.iter().map(|c| c.priority).collect();
    let gap_free = priorities.len() == v.choices.len()
        && priorities.iter().enumerate().all(|(i, &p)| usize::from(p) == i + 1);
    if !gap_free {
        let listed: Vec<String> = v.choices.iter().map(|c| c.priority.to_string()).collect();
        issues.push(error(
            "Vote.PriorityGap",
            format!("priorities [{}] are not 1..={}", listed.join(","), v.choices.len()),
            v,
        ));
    }

    let mut seen: HashSet<&PizzaOptionId> = HashSet::new();
    for c in &v.choices {
        if !seen.insert(&c.pizza_option_id) {
            issues.push(error(
                "Vote.DuplicatePizza",
                format!("pizza {} ranked more than once", c.pizza_option_id),
                v,
            ));
        }
        if !catalog_ids.contains(&c.pizza_option_id) {
            issues.push(error(
                "Vote.UnknownPizza",
                format!("pizza {} is not in the catalog", c.pizza_option_id),
                v,
            ));
        }
    }
}

fn error(code: &'static str, message: String, v: &VoteRecord) -> ValidationIssue {
    ValidationIssue {
        severity: Severity::Error,
        code,
        message,
        where_: EntityRef::Vote(v.voter_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pz_core::{PizzaCatalogEntry, RankedChoice};

    fn input(votes: Vec<VoteRecord>) -> EventBallots {
        EventBallots {
            event: Default::default(),
            catalog: vec![
                PizzaCatalogEntry::new("a".parse().unwrap(), "A", 0),
                PizzaCatalogEntry::new("b".parse().unwrap(), "B", 0),
            ],
            votes,
        }
    }

    fn vote(voter: &str, slices: u32, choices: &[(&str, u8)]) -> VoteRecord {
        VoteRecord {
            voter_id: voter.parse().unwrap(),
            voter_name: voter.into(),
            slice_count: slices,
            choices: choices
                .iter()
                .map(|(id, p)| RankedChoice { pizza_option_id: id.parse().unwrap(), priority: *p })
                .collect(),
        }
    }

    fn codes(r: &ValidationReport) -> Vec<&'static str> {
        r.issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn clean_input_passes() {
        let r = validate(&input(vec![vote("u1", 2, &[("a", 1), ("b", 2)])]), &EngineParams::default());
        assert!(r.pass, "{:?}", r.issues);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn slice_bounds_enforced() {
        let p = EngineParams { max_slice_count: 4, ..EngineParams::default() };
        let r = validate(&input(vec![vote("u1", 0, &[("a", 1)]), vote("u2", 5, &[("a", 1)])]), &p);
        assert!(!r.pass);
        assert_eq!(codes(&r), ["Vote.SliceCountOutOfRange", "Vote.SliceCountOutOfRange"]);
    }

    #[test]
    fn large_weights_pass_by_default() {
        let r = validate(&input(vec![vote("u1", 8, &[("a", 1)]), vote("u2", 40, &[("b", 1)])]), &EngineParams::default());
        assert!(r.pass, "{:?}", r.issues);
        let r = validate(&input(vec![vote("u1", 0, &[("a", 1)])]), &EngineParams::default());
        assert_eq!(codes(&r), ["Vote.SliceCountOutOfRange"]);
    }

    #[test]
    fn priorities_must_start_at_one_without_gaps() {
        let r = validate(&input(vec![vote("u1", 2, &[("a", 1), ("b", 3)])]), &EngineParams::default());
        assert_eq!(codes(&r), ["Vote.PriorityGap"]);
        let r = validate(&input(vec![vote("u1", 2, &[("a", 2), ("b", 2)])]), &EngineParams::default());
        assert_eq!(codes(&r), ["Vote.PriorityGap"]);
    }

    #[test]
    fn references_and_duplicates() {
        let r = validate(
            &input(vec![vote("u1", 2, &[("a", 1), ("a", 2), ("zz", 3)])]),
            &EngineParams::default(),
        );
        assert_eq!(codes(&r), ["Vote.DuplicatePizza", "Vote.UnknownPizza"]);
    }

    #[test]
    fn too_many_or_no_choices() {
        let p = EngineParams { max_choices: 1, ..EngineParams::default() };
        let r = validate(&input(vec![vote("u1", 2, &[("a", 1), ("b", 2)]), vote("u2", 2, &[])]), &p);
        assert_eq!(codes(&r), ["Vote.NoChoices", "Vote.TooManyChoices"]);
    }

    #[test]
    fn duplicate_voter_and_catalog_id() {
        let mut i = input(vec![vote("u1", 2, &[("a", 1)]), vote("u1", 2, &[("b", 1)])]);
        i.catalog.push(PizzaCatalogEntry::new("a".parse().unwrap(), "A again", 0));
        let r = validate(&i, &EngineParams::default());
        assert_eq!(codes(&r), ["Catalog.DuplicateId", "Vote.DuplicateVoter"]);
    }

    #[test]
    fn empty_event_only_warns() {
        let r = validate(&EventBallots::default(), &EngineParams::default());
        assert!(r.pass);
        assert_eq!(codes(&r), ["Catalog.Empty", "Vote.None"]);
    }
}
