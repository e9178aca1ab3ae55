use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

use crate::roster::{BirthdayKey, Squad};

use super::probability::{theoretical_probability, to_percentage};

/// Players per squad in a World Cup squad list.
pub const DEFAULT_SQUAD_SIZE: usize = 23;

/// Largest observed-vs-theory gap (percentage points) still called aligned.
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerSettings {
    pub squad_size: usize,
    pub alignment_threshold: f64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            squad_size: DEFAULT_SQUAD_SIZE,
            alignment_threshold: DEFAULT_ALIGNMENT_THRESHOLD,
        }
    }
}

/// One shared birthday inside a squad
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub birthday: BirthdayKey,
    /// Names in squad (roster-number) order
    pub names: Vec<String>,
}

/// Shared birthdays found in one squad
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionReport {
    pub source_group_id: String,
    /// Ordered by first appearance of the birthday in the squad
    pub collisions: Vec<Collision>,
    /// Members left out of the comparison for lack of a date of birth
    pub undated_members: usize,
}

impl CollisionReport {
    pub fn has_match(&self) -> bool {
        !self.collisions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Aligned,
    NotableDeviation,
}

impl Verdict {
    /// `difference` and `threshold` are both in percentage points.
    pub fn from_difference(difference: f64, threshold: f64) -> Self {
        if difference < threshold {
            Verdict::Aligned
        } else {
            Verdict::NotableDeviation
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            Verdict::Aligned => "Data aligns closely.",
            Verdict::NotableDeviation => "Notable deviation due to small sample size.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence())
    }
}

/// Observed vs. theoretical figures across every eligible squad.
/// Probabilities are percentages, `difference` is in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub squad_size: usize,
    pub total_squads: usize,
    pub squads_with_matches: usize,
    pub observed_probability: f64,
    pub theoretical_probability: f64,
    pub difference: f64,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub reports: Vec<CollisionReport>,
    pub aggregate: AggregateResult,
}

impl Analysis {
    /// Reports for squads with at least one shared birthday
    pub fn matched(&self) -> impl Iterator<Item = &CollisionReport> {
        self.reports.iter().filter(|r| r.has_match())
    }
}

/// Find every birthday shared by two or more members of `squad`.
pub fn detect_collisions(squad: &Squad) -> CollisionReport {
    // key -> (position of first appearance, names)
    let mut seen: HashMap<BirthdayKey, (usize, Vec<String>)> = HashMap::new();
    let mut undated_members = 0;

    for member in squad.members() {
        match member.birthday_key() {
            Some(key) => {
                let next = seen.len();
                seen.entry(key)
                    .or_insert_with(|| (next, Vec::new()))
                    .1
                    .push(member.name.clone());
            }
            None => undated_members += 1,
        }
    }

    let mut shared: Vec<(usize, Collision)> = seen
        .into_iter()
        .filter(|(_, (_, names))| names.len() >= 2)
        .map(|(birthday, (first, names))| (first, Collision { birthday, names }))
        .collect();
    shared.sort_by_key(|(first, _)| *first);

    CollisionReport {
        source_group_id: squad.source_group_id().to_string(),
        collisions: shared.into_iter().map(|(_, c)| c).collect(),
        undated_members,
    }
}

/// Compares observed shared-birthday frequency with the closed-form value.
#[derive(Debug, Clone)]
pub struct BirthdayCollisionAnalyzer {
    settings: AnalyzerSettings,
}

impl BirthdayCollisionAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self { settings }
    }

    /// Analyse squads already produced by `SquadGrouper`. Never fails; an
    /// empty input reports an observed frequency of zero.
    pub fn analyze(&self, squads: &[Squad]) -> Analysis {
        let reports: Vec<CollisionReport> = squads.iter().map(detect_collisions).collect();

        for report in &reports {
            if report.undated_members > 0 {
                debug!(
                    "Squad {}: {} member(s) without a usable date of birth",
                    report.source_group_id, report.undated_members
                );
            }
        }

        let total_squads = reports.len();
        let squads_with_matches = reports.iter().filter(|r| r.has_match()).count();
        let observed_probability = if total_squads > 0 {
            to_percentage(squads_with_matches as f64 / total_squads as f64)
        } else {
            0.0
        };
        let theoretical = to_percentage(theoretical_probability(self.settings.squad_size));
        let difference = (observed_probability - theoretical).abs();
        let verdict = Verdict::from_difference(difference, self.settings.alignment_threshold);

        info!(
            "Analysed {} squad(s) of {}: {} with shared birthdays ({:.2}% observed vs {:.2}% expected)",
            total_squads, self.settings.squad_size, squads_with_matches, observed_probability, theoretical
        );

        Analysis {
            reports,
            aggregate: AggregateResult {
                squad_size: self.settings.squad_size,
                total_squads,
                squads_with_matches,
                observed_probability,
                theoretical_probability: theoretical,
                difference,
                verdict,
            },
        }
    }
}
