//! Partitioning of raw roster rows into eligible, fixed-size squads.
//!
//! Pipeline: filter on roster number, partition by source group (first-seen
//! order), stable sort by roster number, drop short groups, truncate.

use std::collections::HashMap;
use tracing::debug;

use super::models::{PlayerRecord, Squad};

#[derive(Debug, Clone, Copy)]
pub struct SquadGrouper {
    squad_size: usize,
}

impl SquadGrouper {
    pub fn new(squad_size: usize) -> Self {
        Self { squad_size }
    }

    /// Whether a roster number falls inside `[1, squad_size]`.
    fn qualifies(&self, roster_number: Option<u32>) -> bool {
        match roster_number {
            Some(n) => n >= 1 && (n as usize) <= self.squad_size,
            None => false,
        }
    }

    /// Build the eligible squads from `rows`.
    ///
    /// Groups with fewer than `squad_size` qualifying rows are left out
    /// entirely. Duplicate roster numbers still count toward the size and
    /// keep their input order.
    pub fn group(&self, rows: &[PlayerRecord]) -> Vec<Squad> {
        let mut order: Vec<(String, Vec<PlayerRecord>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for row in rows.iter().filter(|r| self.qualifies(r.roster_number)) {
            let slot = match index.get(row.source_group_id.as_str()) {
                Some(&i) => i,
                None => {
                    order.push((row.source_group_id.clone(), Vec::new()));
                    index.insert(row.source_group_id.as_str(), order.len() - 1);
                    order.len() - 1
                }
            };
            order[slot].1.push(row.clone());
        }

        let mut squads = Vec::with_capacity(order.len());
        for (group_id, mut members) in order {
            if members.len() < self.squad_size {
                debug!(
                    "Group {} has {} qualifying players (need {}); skipping",
                    group_id,
                    members.len(),
                    self.squad_size
                );
                continue;
            }
            // sort_by_key is stable: tied roster numbers keep input order
            members.sort_by_key(|m| m.roster_number);
            members.truncate(self.squad_size);
            squads.push(Squad::new(group_id, members));
        }
        squads
    }
}
