//! Mapping of raw classifications and standings into ranked domain lists.

use std::collections::BTreeMap;

use crate::helpers::{join_name, parse_points, parse_u32, NOT_AVAILABLE};
use crate::models::{RankedResult, StandingsEntry};
use crate::services::jolpica::{
    RawConstructor, RawConstructorStanding, RawDriver, RawDriverStanding, RawResult,
};

fn driver_name(driver: Option<&RawDriver>) -> String {
    driver
        .and_then(|d| join_name(&[d.given_name.as_deref(), d.family_name.as_deref()]))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn constructor_name(constructor: Option<&RawConstructor>) -> Option<String> {
    constructor
        .and_then(|c| c.name.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Normalize a raw classification.
///
/// Absent input means the session has not produced results yet and maps to an
/// empty list, as does an empty array. Entries without a usable position are
/// dropped; the first entry wins when a position repeats. Output is sorted by
/// position.
pub fn map_results(raw: Option<&[RawResult]>) -> Vec<RankedResult> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut by_position: BTreeMap<u32, RankedResult> = BTreeMap::new();
    for entry in raw {
        let position = match parse_u32(entry.position.as_deref()) {
            Some(p) if p >= 1 => p,
            _ => {
                tracing::warn!(
                    "Dropping result entry with unusable position {:?}",
                    entry.position
                );
                continue;
            }
        };
        if by_position.contains_key(&position) {
            tracing::warn!("Dropping duplicate result entry for position {}", position);
            continue;
        }

        by_position.insert(
            position,
            RankedResult {
                position,
                driver: driver_name(entry.driver.as_ref()),
                constructor: constructor_name(entry.constructor.as_ref())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                grid: parse_u32(entry.grid.as_deref()),
                points: parse_points(entry.points.as_deref()),
                q1: entry.q1.clone().unwrap_or_default(),
                q2: entry.q2.clone().unwrap_or_default(),
                q3: entry.q3.clone().unwrap_or_default(),
            },
        );
    }

    by_position.into_values().collect()
}

/// Driver standings. Rank is the entry's place in the upstream list; the
/// constructor is the driver's most recent team.
pub fn map_driver_standings(raw: &[RawDriverStanding]) -> Vec<StandingsEntry> {
    raw.iter()
        .zip(1u32..)
        .map(|(entry, position)| StandingsEntry {
            position,
            name: driver_name(entry.driver.as_ref()),
            constructor: entry
                .constructors
                .iter()
                .rev()
                .find_map(|c| constructor_name(Some(c))),
            points: parse_points(entry.points.as_deref()),
        })
        .collect()
}

pub fn map_constructor_standings(raw: &[RawConstructorStanding]) -> Vec<StandingsEntry> {
    raw.iter()
        .zip(1u32..)
        .map(|(entry, position)| StandingsEntry {
            position,
            name: constructor_name(entry.constructor.as_ref())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            constructor: None,
            points: parse_points(entry.points.as_deref()),
        })
        .collect()
}
