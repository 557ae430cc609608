use std::net::IpAddr;

use crate::matcher::matches_prefix;
use crate::observer::{ConditionKind, PolicyEvent, PolicyObserver};
use crate::prefix::Prefix;
use crate::route::Path;
use crate::schema::{NeighborSet, PrefixSet};

/// A predicate over a route.
///
/// Every variant follows the same convention: an empty list imposes no
/// constraint and matches every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Prefix(PrefixCondition),
    Neighbor(NeighborCondition),
}

impl Condition {
    pub fn evaluate<P: Path + ?Sized>(&self, path: &P, observer: &dyn PolicyObserver) -> bool {
        match self {
            Condition::Prefix(c) => c.evaluate(path, observer),
            Condition::Neighbor(c) => c.evaluate(path, observer),
        }
    }
}

/// Matches routes whose NLRI matches any prefix of a prefix set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixCondition {
    pub prefix_list: Vec<Prefix>,
}

impl PrefixCondition {
    pub fn new(prefix_list: Vec<Prefix>) -> Self {
        Self { prefix_list }
    }

    /// Build from the prefix set called `name`.
    ///
    /// Entries that fail to parse are reported and skipped; an unknown name
    /// yields an empty condition.
    pub fn from_sets(name: &str, sets: &[PrefixSet], observer: &dyn PolicyObserver) -> Self {
        let mut prefix_list = Vec::new();
        for set in sets.iter().filter(|s| s.prefix_set_name == name) {
            for entry in &set.prefix_list {
                match Prefix::from_config(
                    &entry.address,
                    entry.masklength,
                    &entry.masklength_range,
                    observer,
                ) {
                    Ok(prefix) => prefix_list.push(prefix),
                    Err(e) => observer.on_event(&PolicyEvent::PrefixSkipped {
                        prefix_set: &set.prefix_set_name,
                        address: &entry.address,
                        error: e.to_string(),
                    }),
                }
            }
        }
        Self { prefix_list }
    }

    /// First matching prefix wins.
    pub fn evaluate<P: Path + ?Sized>(&self, path: &P, observer: &dyn PolicyObserver) -> bool {
        if self.prefix_list.is_empty() {
            observer.on_event(&PolicyEvent::EmptyConditionList {
                kind: ConditionKind::Prefix,
            });
            return true;
        }

        match self
            .prefix_list
            .iter()
            .find(|p| matches_prefix(path, p, observer))
        {
            Some(p) => {
                observer.on_event(&PolicyEvent::PrefixMatched {
                    address: p.address(),
                    masklength: p.masklength(),
                });
                true
            }
            None => false,
        }
    }
}

/// Matches routes learned from any peer of a neighbor set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborCondition {
    pub neighbor_list: Vec<IpAddr>,
}

impl NeighborCondition {
    pub fn new(neighbor_list: Vec<IpAddr>) -> Self {
        Self {
            neighbor_list: neighbor_list.iter().map(IpAddr::to_canonical).collect(),
        }
    }

    /// Build from the neighbor set called `name`; an unknown name yields an
    /// empty condition.
    pub fn from_sets(name: &str, sets: &[NeighborSet]) -> Self {
        Self::new(
            sets.iter()
                .filter(|s| s.neighbor_set_name == name)
                .flat_map(|s| s.neighbor_info_list.iter().map(|n| n.address))
                .collect(),
        )
    }

    pub fn evaluate<P: Path + ?Sized>(&self, path: &P, observer: &dyn PolicyObserver) -> bool {
        if self.neighbor_list.is_empty() {
            observer.on_event(&PolicyEvent::EmptyConditionList {
                kind: ConditionKind::Neighbor,
            });
            return true;
        }

        // IpAddr equality never crosses families.
        let source = path.source_address().to_canonical();
        self.neighbor_list.iter().any(|n| *n == source)
    }
}
