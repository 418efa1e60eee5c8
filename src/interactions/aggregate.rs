use super::structs::SelectedAtom;
use crate::residues::ResidueId;

use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Running count, mean, and variance of a stream of distances, Welford style.
///
/// Stores three numbers per group instead of every sample, so aggregation
/// memory stays proportional to the number of residue pairs rather than the
/// number of atom pairs.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the accumulator.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Combine two accumulators as if their samples had been pushed into one.
    ///
    /// Uses the parallel variance merge formula of Chan et al., so partial
    /// aggregates computed on separate workers can be reduced in a fixed
    /// order with results independent of the worker count.
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let n1 = self.count as f64;
        let n2 = other.count as f64;
        let total = n1 + n2;
        let delta = other.mean - self.mean;
        self.mean += delta * n2 / total;
        self.m2 += other.m2 + delta * delta * n1 * n2 / total;
        self.count += other.count;
    }

    /// Number of samples seen.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of the samples seen.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (divisor is the count, not count - 1).
    pub fn variance(&self) -> f64 {
        match self.count {
            0 => 0.0,
            n => self.m2 / n as f64,
        }
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// The per-residue-pair distance statistics produced by one aggregation pass.
pub type InteractionGroups = HashMap<(ResidueId, ResidueId), RunningStats>;

/// Accumulate the Euclidean distance of every bait-prey atom pair into
/// per-residue-pair statistics.
///
/// Atom pairs within one residue occurrence are skipped, so a residue that
/// qualifies as both bait and prey never pairs with itself. Each bait atom's
/// contributions are aggregated independently and the partial results are
/// merged in bait input order, which keeps the output identical no matter how
/// many rayon workers run the pass.
pub fn aggregate_distances(bait: &[SelectedAtom], prey: &[SelectedAtom]) -> InteractionGroups {
    let partials: Vec<InteractionGroups> = bait
        .par_iter()
        .map(|b| {
            let mut local = InteractionGroups::new();
            for p in prey {
                if b.residue == p.residue {
                    continue;
                }
                let dist = (b.pos - p.pos).norm();
                local
                    .entry((b.residue.clone(), p.residue.clone()))
                    .or_default()
                    .push(dist);
            }
            local
        })
        .collect();

    let mut groups = InteractionGroups::new();
    for local in partials {
        for (key, stats) in local {
            match groups.entry(key) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(&stats),
                Entry::Vacant(entry) => {
                    entry.insert(stats);
                }
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra as na;

    const TOL: f64 = 1e-9;

    fn atom(chain: &str, resn: &str, resi: isize, atomn: &str, pos: [f64; 3]) -> SelectedAtom {
        SelectedAtom {
            residue: ResidueId {
                chain: chain.to_string(),
                resi,
                insertion: "".to_string(),
                resn: resn.to_string(),
            },
            atomn: atomn.to_string(),
            pos: na::Vector3::new(pos[0], pos[1], pos[2]),
        }
    }

    #[test]
    fn three_sample_population_stats() {
        let mut stats = RunningStats::new();
        for x in [3.0, 4.0, 5.0] {
            stats.push(x);
        }
        assert_eq!(stats.count(), 3);
        assert!((stats.mean() - 4.0).abs() < TOL);
        // Population std dev of {3, 4, 5}, not the Bessel-corrected one (1.0)
        assert!((stats.std_dev() - (2.0f64 / 3.0).sqrt()).abs() < TOL);
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let mut stats = RunningStats::new();
        stats.push(4.2);
        assert_eq!(stats.count(), 1);
        assert!((stats.mean() - 4.2).abs() < TOL);
        assert_eq!(stats.std_dev(), 0.0);
    }

    #[test]
    fn merge_matches_sequential_pushes() {
        let samples = [4.0, 4.2, 4.1, 4.3, 4.0, 4.4, 3.9, 4.5];

        let mut sequential = RunningStats::new();
        for x in samples {
            sequential.push(x);
        }

        let (left, right) = samples.split_at(3);
        let mut a = RunningStats::new();
        left.iter().for_each(|&x| a.push(x));
        let mut b = RunningStats::new();
        right.iter().for_each(|&x| b.push(x));
        a.merge(&b);

        assert_eq!(a.count(), sequential.count());
        assert!((a.mean() - sequential.mean()).abs() < TOL);
        assert!((a.variance() - sequential.variance()).abs() < TOL);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut stats = RunningStats::new();
        stats.push(1.0);
        stats.push(2.0);
        let before = stats.clone();

        stats.merge(&RunningStats::new());
        assert_eq!(stats.count(), before.count());
        assert!((stats.mean() - before.mean()).abs() < TOL);

        let mut empty = RunningStats::new();
        empty.merge(&before);
        assert_eq!(empty.count(), 2);
        assert!((empty.mean() - 1.5).abs() < TOL);
    }

    #[test]
    fn distances_group_by_residue_pair() {
        let bait = vec![atom("A", "ARG", 25, "CZ", [0.0, 0.0, 0.0])];
        let prey = vec![
            atom("A", "PHE", 60, "CG", [3.0, 0.0, 0.0]),
            atom("A", "PHE", 60, "CD1", [0.0, 4.0, 0.0]),
            atom("A", "PHE", 60, "CD2", [0.0, 0.0, 5.0]),
            atom("B", "TYR", 40, "CG", [7.0, 0.0, 0.0]),
        ];
        let groups = aggregate_distances(&bait, &prey);
        assert_eq!(groups.len(), 2);

        let key = (bait[0].residue.clone(), prey[0].residue.clone());
        let stats = &groups[&key];
        assert_eq!(stats.count(), 3);
        assert!((stats.mean() - 4.0).abs() < TOL);
        assert!((stats.std_dev() - (2.0f64 / 3.0).sqrt()).abs() < TOL);
    }

    #[test]
    fn bait_atoms_of_one_residue_share_a_group() {
        // Two bait atoms on the same residue against one prey residue
        let bait = vec![
            atom("A", "ARG", 25, "CZ", [0.0, 0.0, 0.0]),
            atom("A", "ARG", 25, "NE", [1.0, 0.0, 0.0]),
        ];
        let prey = vec![atom("A", "PHE", 60, "CG", [4.0, 0.0, 0.0])];
        let groups = aggregate_distances(&bait, &prey);
        assert_eq!(groups.len(), 1);

        let key = (bait[0].residue.clone(), prey[0].residue.clone());
        assert_eq!(groups[&key].count(), 2);
        assert!((groups[&key].mean() - 3.5).abs() < TOL);
    }

    #[test]
    fn self_pairs_are_skipped() {
        // A lone residue acting as both bait and prey yields no groups
        let tyr_cz = atom("B", "TYR", 40, "CZ", [0.0, 0.0, 0.0]);
        let prey = vec![
            atom("B", "TYR", 40, "CG", [1.4, 0.0, 0.0]),
            tyr_cz.clone(),
        ];
        let groups = aggregate_distances(&[tyr_cz], &prey);
        assert!(groups.is_empty());
    }

    #[test]
    fn empty_inputs_yield_no_groups() {
        let arg = atom("A", "ARG", 25, "CZ", [0.0, 0.0, 0.0]);
        assert!(aggregate_distances(&[], &[arg.clone()]).is_empty());
        assert!(aggregate_distances(&[arg], &[]).is_empty());
        assert!(aggregate_distances(&[], &[]).is_empty());
    }
}
