//! Mob drop-rate merging.
//!
//! Joins scraped drop-rate records onto per-zone mob files, matching
//! case-insensitively on (item, mob, zone). Drops without a matching rate
//! record default to 100% with zeroed observation counts.

use crate::error::{FfxiError, Result};
use crate::models::{DropRateRecord, ItemDrop, MobRecord};
use std::path::Path;
use tracing::warn;

/// Default chance used when a drop has no rate record or the chance string
/// does not parse.
const DEFAULT_PERCENT: f64 = 100.0;

/// Repair the pseudo-JSON produced by the scraper, which quotes strings
/// with single quotes. Unescaped `'` becomes the string delimiter `"`;
/// escaped apostrophes (`\'`) inside values become plain `'`, since `\'`
/// is not a valid JSON escape.
pub fn repair_single_quotes(text: &str) -> String {
    let mut repaired = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'\'') => {
                chars.next();
                repaired.push('\'');
            }
            '\'' => repaired.push('"'),
            other => repaired.push(other),
        }
    }
    repaired
}

/// Load the drop-rate file, repairing its quoting before parsing.
pub fn load_drop_rates(path: &Path) -> Result<Vec<DropRateRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| FfxiError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let repaired = repair_single_quotes(&text);
    serde_json::from_str(&repaired).map_err(|source| FfxiError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a percentage like `"24.1%"`.
pub fn parse_percent(text: &str) -> Option<f64> {
    text.trim().strip_suffix('%')?.trim().parse().ok()
}

/// Find the rate record for one drop of one mob.
fn find_rate<'a>(
    rates: &'a [DropRateRecord],
    item: &str,
    mob: &str,
    zone: &str,
) -> Option<&'a DropRateRecord> {
    rates.iter().find(|rate| {
        rate.item_name.eq_ignore_ascii_case(item)
            && rate.npc.eq_ignore_ascii_case(mob)
            && rate.zone.eq_ignore_ascii_case(zone)
    })
}

/// Update every drop of every mob in place with the scraped drop chance.
pub fn merge_drop_chances(mobs: &mut [MobRecord], rates: &[DropRateRecord]) {
    for mob in mobs.iter_mut() {
        let mut updated = Vec::with_capacity(mob.item_drops.len());
        for drop in &mob.item_drops {
            match find_rate(rates, &drop.name, &mob.name, &mob.zone_name) {
                Some(rate) => {
                    let percent = parse_percent(&rate.chance).unwrap_or_else(|| {
                        warn!(
                            "Unparseable chance {:?} for item {:?}, defaulting to {}%",
                            rate.chance, drop.name, DEFAULT_PERCENT
                        );
                        DEFAULT_PERCENT
                    });
                    updated.push(ItemDrop {
                        name: drop.name.clone(),
                        percent,
                        amount_dropped: drop.amount_dropped,
                        amount_defeated: drop.amount_defeated,
                    });
                }
                None => {
                    updated.push(ItemDrop {
                        name: drop.name.clone(),
                        percent: DEFAULT_PERCENT,
                        amount_dropped: 0,
                        amount_defeated: 0,
                    });
                }
            }
        }
        mob.item_drops = updated;
    }
}
