//! Bounded, representative subsets of a filtered catalog for rendering.

use log::debug;

use crate::catalog::{OrbitClass, SatelliteRecord};

/// Picks at most `limit` records, keeping every orbit class represented and the class
/// proportions roughly intact.
///
/// The result is deterministic and has exactly `min(entities.len(), limit)` records.
/// Records with an unset orbit class only fill slots the classified records cannot.
pub fn sample_for_display(entities: &[SatelliteRecord], limit: usize) -> Vec<&SatelliteRecord> {
    sample_refs(entities.iter().collect(), limit)
}

/// Like [`sample_for_display`], restricted to records that have an element set.
pub fn sample_traceable(entities: &[SatelliteRecord], limit: usize) -> Vec<&SatelliteRecord> {
    let traceable = entities.iter().filter(|r| r.has_trajectory()).collect();
    sample_refs(traceable, limit)
}

fn sample_refs(entities: Vec<&SatelliteRecord>, limit: usize) -> Vec<&SatelliteRecord> {
    if entities.len() <= limit {
        return entities;
    }

    let (groups, unclassified) = group_by_class(&entities);
    let mut quotas = allocate(&groups, limit);

    // Top up from classes with spare records, then from unclassified ones. Only needed
    // when fewer classified records exist than slots.
    let mut shortfall = limit - quotas.iter().sum::<usize>();
    for (quota, (_, members)) in quotas.iter_mut().zip(&groups) {
        let extra = shortfall.min(members.len() - *quota);
        *quota += extra;
        shortfall -= extra;
    }
    let unclassified_quota = shortfall.min(unclassified.len());

    let mut result = Vec::with_capacity(limit);
    for (quota, (class, members)) in quotas.iter().zip(&groups) {
        debug!("Sampling {} of {} {} records", quota, members.len(), class);
        result.extend(front_and_back(members, *quota));
    }
    result.extend(front_and_back(&unclassified, unclassified_quota));
    result
}

type Groups<'a> = Vec<(OrbitClass, Vec<&'a SatelliteRecord>)>;

/// Groups classified records in first-appearance order.
fn group_by_class<'a>(entities: &[&'a SatelliteRecord]) -> (Groups<'a>, Vec<&'a SatelliteRecord>) {
    let mut groups: Groups = Vec::new();
    let mut unclassified = Vec::new();

    for &record in entities {
        match record.orbit_class {
            Some(class) => match groups.iter_mut().find(|(c, _)| *c == class) {
                Some((_, members)) => members.push(record),
                None => groups.push((class, vec![record])),
            },
            None => unclassified.push(record),
        }
    }

    (groups, unclassified)
}

/// Per-class slot counts. One slot per class is reserved when the limit allows it; the
/// rest is split proportionally with running totals so rounding errors do not pile up.
fn allocate(groups: &Groups, limit: usize) -> Vec<usize> {
    let mut remaining_in: usize = groups.iter().map(|(_, m)| m.len()).sum();
    let mut remaining_out = limit;

    let reserved = if limit >= groups.len() { 1 } else { 0 };
    remaining_in -= reserved * groups.len();
    remaining_out -= reserved * groups.len();

    groups
        .iter()
        .map(|(_, members)| {
            let current_in = members.len() - reserved;
            let share = if remaining_in == 0 {
                0
            } else {
                (current_in as f64 / remaining_in as f64 * remaining_out as f64).round() as usize
            };
            let share = share.min(remaining_out);
            remaining_in -= current_in;
            remaining_out -= share;
            // a class never supplies more than it has
            (share + reserved).min(members.len())
        })
        .collect()
}

/// Half (rounded up) from the front, the rest from the back, so both the oldest and the
/// newest records of a class show up.
fn front_and_back<'a>(members: &[&'a SatelliteRecord], count: usize) -> Vec<&'a SatelliteRecord> {
    let count = count.min(members.len());
    let from_front = count.div_ceil(2);
    let from_back = count - from_front;
    members[..from_front]
        .iter()
        .chain(&members[members.len() - from_back..])
        .copied()
        .collect()
}
