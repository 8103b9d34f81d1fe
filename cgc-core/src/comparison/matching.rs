use std::collections::{BTreeMap, BTreeSet};

use bio::bio_types::strand::ReqStrand;
use log::trace;

use crate::config::MatchPolicy;
use crate::types::GeneCall;

use super::{CallerId, PooledCall};

/// Whether the members of a group agree on both boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAgreement {
    /// Every member has the same left and right end
    Exact,
    /// Members share the start but disagree on the stop end
    StartOnly,
}

impl std::fmt::Display for BoundaryAgreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::StartOnly => write!(f, "start-only"),
        }
    }
}

/// Calls from distinct callers judged to be the same gene.
///
/// A call without a counterpart forms a group of its own.
#[derive(Debug, Clone)]
pub struct CallGroup {
    contig: String,
    strand: ReqStrand,
    start: u64,
    members: Vec<usize>,
    callers: Vec<CallerId>,
    agreement: Option<BoundaryAgreement>,
}

impl CallGroup {
    #[must_use]
    pub fn contig(&self) -> &str {
        &self.contig
    }

    #[must_use]
    pub const fn strand(&self) -> ReqStrand {
        self.strand
    }

    /// Shared translation start of the members
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Indices into the comparison pool, ordered by caller
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Contributing callers, ascending and distinct
    #[must_use]
    pub fn callers(&self) -> &[CallerId] {
        &self.callers
    }

    /// Boundary agreement of the members, `None` for a single call
    #[must_use]
    pub const fn agreement(&self) -> Option<BoundaryAgreement> {
        self.agreement
    }

    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// Union-find over pool indices that refuses to join two calls of the same
/// caller.
#[derive(Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    callers: Vec<BTreeSet<CallerId>>,
}

impl DisjointSet {
    pub(crate) fn new(owners: impl IntoIterator<Item = CallerId>) -> Self {
        let callers: Vec<BTreeSet<CallerId>> =
            owners.into_iter().map(|c| BTreeSet::from([c])).collect();
        Self {
            parent: (0..callers.len()).collect(),
            rank: vec![0; callers.len()],
            callers,
        }
    }

    pub(crate) fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Join the sets of `a` and `b`.
    ///
    /// Returns `false` when they are already joined or when their caller sets
    /// overlap.
    pub(crate) fn try_union(&mut self, a: usize, b: usize) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b || !self.callers[root_a].is_disjoint(&self.callers[root_b]) {
            return false;
        }

        let (root, child) = if self.rank[root_a] >= self.rank[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        if self.rank[root] == self.rank[child] {
            self.rank[root] += 1;
        }
        self.parent[child] = root;
        let moved = std::mem::take(&mut self.callers[child]);
        self.callers[root].extend(moved);
        true
    }
}

type MatchKey<'a> = (&'a str, ReqStrand, u64, Option<u64>);

fn match_key(call: &GeneCall, policy: MatchPolicy) -> MatchKey<'_> {
    let stop = match policy {
        MatchPolicy::StartCodon => None,
        MatchPolicy::ExactBoundaries => Some(call.stop()),
    };
    (call.contig(), call.strand(), call.start(), stop)
}

/// Group the pool into loci.
///
/// Calls are bucketed by contig, strand and start (plus stop under
/// [`MatchPolicy::ExactBoundaries`]). Inside a bucket every pair from
/// different callers is a candidate; candidates are joined closest stop
/// first, and a join that would put two calls of one caller in the same
/// group is refused, leaving the farther duplicate on its own.
pub(crate) fn build_groups(pool: &[PooledCall], policy: MatchPolicy) -> Vec<CallGroup> {
    let mut sets = DisjointSet::new(pool.iter().map(|p| p.caller));

    let mut buckets: BTreeMap<MatchKey<'_>, Vec<usize>> = BTreeMap::new();
    for (index, pooled) in pool.iter().enumerate() {
        buckets
            .entry(match_key(&pooled.call, policy))
            .or_default()
            .push(index);
    }

    for members in buckets.values().filter(|m| m.len() > 1) {
        let mut candidates = Vec::new();
        for (offset, &a) in members.iter().enumerate() {
            for &b in &members[offset + 1..] {
                if pool[a].caller != pool[b].caller {
                    let distance = pool[a].call.stop().abs_diff(pool[b].call.stop());
                    candidates.push((distance, a, b));
                }
            }
        }
        candidates.sort_unstable();

        for (distance, a, b) in candidates {
            if sets.try_union(a, b) {
                trace!("Joined pool entries {a} and {b} (stop distance {distance})");
            }
        }
    }

    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for index in 0..pool.len() {
        let root = sets.find(index);
        components.entry(root).or_default().push(index);
    }

    let mut groups: Vec<CallGroup> = components
        .into_values()
        .map(|mut members| {
            members.sort_by_key(|&i| (pool[i].caller, i));
            let first = &pool[members[0]].call;
            let agreement = if members.len() == 1 {
                None
            } else if members
                .iter()
                .all(|&i| pool[i].call.same_boundaries(first))
            {
                Some(BoundaryAgreement::Exact)
            } else {
                Some(BoundaryAgreement::StartOnly)
            };
            let callers: Vec<CallerId> = members
                .iter()
                .map(|&i| pool[i].caller)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            CallGroup {
                contig: first.contig().to_string(),
                strand: first.strand(),
                start: first.start(),
                members,
                callers,
                agreement,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        a.contig
            .cmp(&b.contig)
            .then(a.start.cmp(&b.start))
            .then(a.strand.cmp(&b.strand))
            .then(a.members.iter().min().cmp(&b.members.iter().min()))
    });
    groups
}
