//! Space-network filings: the read-only snapshot the engine scores against.

pub mod domain;
pub mod import;
pub mod proximity;
pub mod status;

pub use domain::{Filing, FilingCategory, SuspensionInterval, SuspensionKind};
pub use import::{FilingImporter, FilingRecordError, FilingSnapshot, RejectedFiling};
pub use proximity::{longitudinal_distance, nearby, normalize_longitude, NearbyFiling};
pub use status::{is_grandfathered, status_at, FilingMaturity, FilingStatus, SuspensionState};

use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Immutable table of filings for one evaluation run, keyed by network name.
#[derive(Debug, Clone, Default)]
pub struct FilingTable {
    filings: Vec<Filing>,
}

impl FilingTable {
    /// Build the table, folding renamed predecessors into their successors.
    pub fn new(filings: Vec<Filing>) -> Self {
        Self {
            filings: merge_renamed(filings),
        }
    }

    pub fn filings(&self) -> &[Filing] {
        &self.filings
    }

    pub fn get(&self, name: &str) -> Option<&Filing> {
        self.filings.iter().find(|filing| filing.name == name)
    }

    pub fn len(&self) -> usize {
        self.filings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }

    pub fn nearby(&self, longitude: f64, window_degrees: f64) -> Vec<NearbyFiling<'_>> {
        proximity::nearby(&self.filings, longitude, window_degrees)
    }
}

fn merge_renamed(filings: Vec<Filing>) -> Vec<Filing> {
    let by_name: HashMap<&str, usize> = filings
        .iter()
        .enumerate()
        .map(|(index, filing)| (filing.name.as_str(), index))
        .collect();

    let mut absorbed: HashSet<usize> = HashSet::new();
    let mut merged = Vec::with_capacity(filings.len());

    for filing in &filings {
        let mut current = filing.clone();
        for index in predecessor_chain(&filings, &by_name, filing) {
            absorb(&mut current, &filings[index]);
            absorbed.insert(index);
        }
        merged.push(current);
    }

    merged
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !absorbed.contains(index))
        .map(|(_, filing)| filing)
        .collect()
}

fn predecessor_chain(
    filings: &[Filing],
    by_name: &HashMap<&str, usize>,
    filing: &Filing,
) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut visited: HashSet<&str> = HashSet::from([filing.name.as_str()]);
    let mut predecessor = filing.previous_name.as_deref();

    while let Some(previous) = predecessor {
        if !visited.insert(previous) {
            warn!(network = %filing.name, previous, "rename chain loops back on itself");
            return Vec::new();
        }
        let Some(&index) = by_name.get(previous) else {
            break;
        };
        chain.push(index);
        predecessor = filings[index].previous_name.as_deref();
    }

    chain
}

fn absorb(successor: &mut Filing, predecessor: &Filing) {
    successor.early_stage_date = earliest(successor.early_stage_date, predecessor.early_stage_date);
    successor.late_stage_date = earliest(successor.late_stage_date, predecessor.late_stage_date);
    successor.brought_into_use_date = earliest(
        successor.brought_into_use_date,
        predecessor.brought_into_use_date,
    );

    let mut suspensions = predecessor.suspensions.clone();
    suspensions.append(&mut successor.suspensions);
    suspensions.sort_by_key(|interval| interval.start);
    successor.suspensions = suspensions;
}

fn earliest<T: Ord>(left: Option<T>, right: Option<T>) -> Option<T> {
    match (left, right) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
