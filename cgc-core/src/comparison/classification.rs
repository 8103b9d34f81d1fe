use super::CallerId;
use super::matching::CallGroup;

/// Where a locus falls once every caller has been considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocusClass {
    /// Called by every merged caller
    CommonCore,
    /// Called by more than one caller, but not all
    Partial,
    /// Called by exactly one caller
    Unique(CallerId),
}

impl LocusClass {
    /// Classify a group against the number of merged callers.
    ///
    /// With a single caller every locus is common core.
    #[must_use]
    pub fn of(group: &CallGroup, caller_count: usize) -> Self {
        match group.callers() {
            callers if callers.len() == caller_count => Self::CommonCore,
            [only] => Self::Unique(*only),
            _ => Self::Partial,
        }
    }

    /// Short name used in reports
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CommonCore => "common_core",
            Self::Partial => "partial",
            Self::Unique(_) => "unique",
        }
    }
}

/// Partition of the groups of a comparison, as indices into its group list.
///
/// Each group index appears in exactly one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Groups called by every caller
    pub common_core: Vec<usize>,
    /// Groups called by some callers
    pub partial: Vec<usize>,
    /// Per caller (indexed by caller id), its groups called by no one else
    pub unique: Vec<Vec<usize>>,
}

impl Classification {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.common_core.is_empty()
            && self.partial.is_empty()
            && self.unique.iter().all(Vec::is_empty)
    }
}

/// Partition `groups` without altering them.
pub(crate) fn classify(groups: &[CallGroup], caller_count: usize) -> Classification {
    let mut classification = Classification {
        unique: vec![Vec::new(); caller_count],
        ..Default::default()
    };

    for (index, group) in groups.iter().enumerate() {
        match LocusClass::of(group, caller_count) {
            LocusClass::CommonCore => classification.common_core.push(index),
            LocusClass::Partial => classification.partial.push(index),
            LocusClass::Unique(caller) => classification.unique[caller].push(index),
        }
    }
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::PooledCall;
    use crate::comparison::matching::build_groups;
    use crate::config::MatchPolicy;
    use crate::types::{GeneCall, GeneCaller};
    use bio::bio_types::strand::ReqStrand;

    fn pool(entries: &[(CallerId, u64, u64)]) -> Vec<PooledCall> {
        entries
            .iter()
            .map(|&(caller, left, right)| PooledCall {
                call: GeneCall::new(GeneCaller::Unknown, "g", "c1", ReqStrand::Forward, left, right)
                    .unwrap(),
                caller,
            })
            .collect()
    }

    #[test]
    fn test_three_callers_partition() {
        let pool = pool(&[
            (0, 10, 100),
            (1, 10, 110),
            (2, 10, 120),
            (0, 500, 600),
            (1, 500, 600),
            (2, 900, 990),
        ]);
        let groups = build_groups(&pool, MatchPolicy::StartCodon);
        let classification = classify(&groups, 3);

        assert_eq!(classification.common_core.len(), 1);
        assert_eq!(classification.partial.len(), 1);
        assert_eq!(groups[classification.partial[0]].callers(), &[0, 1]);
        assert!(classification.unique[0].is_empty());
        assert!(classification.unique[1].is_empty());
        assert_eq!(classification.unique[2].len(), 1);
    }

    #[test]
    fn test_single_caller_is_all_common_core() {
        let pool = pool(&[(0, 10, 100), (0, 200, 300), (0, 200, 300)]);
        let groups = build_groups(&pool, MatchPolicy::StartCodon);
        let classification = classify(&groups, 1);
        assert_eq!(classification.common_core.len(), 3);
        assert!(classification.partial.is_empty());
        assert!(classification.unique[0].is_empty());
    }

    #[test]
    fn test_every_group_classified_once() {
        let pool = pool(&[(0, 10, 100), (1, 10, 100), (1, 40, 100), (2, 40, 90)]);
        let groups = build_groups(&pool, MatchPolicy::StartCodon);
        let classification = classify(&groups, 3);

        let mut seen: Vec<usize> = classification
            .common_core
            .iter()
            .chain(&classification.partial)
            .chain(classification.unique.iter().flatten())
            .copied()
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..groups.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_no_callers() {
        let classification = classify(&[], 0);
        assert!(classification.is_empty());
        assert!(classification.unique.is_empty());
    }

    #[test]
    fn test_locus_class_names() {
        assert_eq!(LocusClass::CommonCore.name(), "common_core");
        assert_eq!(LocusClass::Partial.name(), "partial");
        assert_eq!(LocusClass::Unique(3).name(), "unique");
    }
}
