use super::aggregate::InteractionGroups;
use super::structs::InteractionRecord;
use crate::config::ScreenConfig;

/// Reduce the aggregated groups to the records that clear every threshold.
///
/// The three gates are AND-combined: a group must have at least
/// `min_interactions` samples, a mean within `mean_threshold`, and a
/// population standard deviation within `std_threshold`. Survivors are
/// sorted by bait residue then prey residue so the report is reproducible
/// for a given input. Zero passing groups is a valid outcome.
pub fn filter_groups(groups: InteractionGroups, config: &ScreenConfig) -> Vec<InteractionRecord> {
    let mut records: Vec<InteractionRecord> = groups
        .into_iter()
        .filter(|(_, stats)| {
            stats.count() >= config.min_interactions
                && stats.mean() <= config.mean_threshold
                && stats.std_dev() <= config.std_threshold
        })
        .map(|((bait, prey), stats)| InteractionRecord {
            bait,
            prey,
            count: stats.count(),
            mean_dist: stats.mean(),
            std_dist: stats.std_dev(),
        })
        .collect();

    records.sort_by(|a, b| (&a.bait, &a.prey).cmp(&(&b.bait, &b.prey)));
    records
}
