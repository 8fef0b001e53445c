use super::model::FlowGroup;

/// Merges groups that share at least one screen, transitively.
///
/// The earliest group of each connected component survives and absorbs the
/// others in input order, so its id, method and metadata win. The result
/// contains pairwise disjoint groups, and merging it again is a no-op.
pub fn merge_groups(groups: Vec<FlowGroup>) -> Vec<FlowGroup> {
    let mut merged: Vec<FlowGroup> = Vec::with_capacity(groups.len());

    for group in groups {
        let overlapping: Vec<usize> = merged
            .iter()
            .enumerate()
            .filter(|(_, existing)| existing.shares_screen_with(&group))
            .map(|(i, _)| i)
            .collect();

        let Some((&first, rest)) = overlapping.split_first() else {
            merged.push(group);
            continue;
        };

        // The new group may bridge several earlier components; fold them into the first.
        let mut bridged: Vec<FlowGroup> = rest.iter().rev().map(|&i| merged.remove(i)).collect();
        bridged.reverse();
        for other in bridged {
            merged[first].absorb(other);
        }
        merged[first].absorb(group);
    }

    merged
}
