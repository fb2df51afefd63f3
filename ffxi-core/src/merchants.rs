//! Merchant price list normalization.
//!
//! Parses the scraped goods/price blob and location string of each merchant
//! page, then groups the resulting listings by zone for per-zone output.

use crate::error::Result;
use crate::file_utils::write_pretty_json;
use crate::models::{MerchantListing, PricedItem, RawMerchantRecord};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

lazy_static! {
    static ref GOODS_PRICE_RE: Regex = Regex::new(r"([^\d]+) (\d+)-(\d+) gil").unwrap();
    static ref ZONE_RANK_RE: Regex = Regex::new(r"([^\(]+) \(([^\)]+)\)").unwrap();
}

/// Extract `<item> <min>-<max> gil` entries from the goods blob.
///
/// Scraped item names occasionally carry a leading fragment from the
/// previous table row separated by a newline; only the part after the
/// newline is the real name.
pub fn extract_priced_items(goods_price: &str) -> Vec<PricedItem> {
    let mut items = Vec::new();
    for caps in GOODS_PRICE_RE.captures_iter(goods_price) {
        let raw_name = caps[1].trim();
        let item_name = match raw_name.split('\n').nth(1) {
            Some(after_newline) => after_newline.trim().to_string(),
            None => raw_name.to_string(),
        };
        let min_price = caps[2].parse().unwrap_or(0);
        let max_price = caps[3].parse().unwrap_or(0);
        items.push(PricedItem {
            item_name,
            min_price,
            max_price,
        });
    }
    items
}

/// Split `"Zone Name (Rank)"` into zone and rank.
pub fn extract_zone_and_rank(location: &str) -> Option<(String, String)> {
    let caps = ZONE_RANK_RE.captures(location)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// Normalize every raw merchant record, preserving input order. A location
/// that does not parse leaves zone and rank empty rather than failing.
pub fn build_listings(records: &[RawMerchantRecord]) -> Vec<MerchantListing> {
    records
        .iter()
        .map(|record| {
            let (zone, rank) = extract_zone_and_rank(&record.location).unwrap_or_default();
            if zone.is_empty() {
                debug!("No zone parsed for merchant {:?}", record.merchant);
            }
            MerchantListing {
                merchant: record.merchant.clone(),
                items: extract_priced_items(&record.goods_price),
                zone,
                rank,
            }
        })
        .collect()
}

/// Group listings by zone, zones sorted, listings in input order.
pub fn group_by_zone(listings: Vec<MerchantListing>) -> BTreeMap<String, Vec<MerchantListing>> {
    let mut zones: BTreeMap<String, Vec<MerchantListing>> = BTreeMap::new();
    for listing in listings {
        zones.entry(listing.zone.clone()).or_default().push(listing);
    }
    zones
}

/// Write one `<zone>.json` per zone into `output_dir`.
pub fn write_zone_files(
    output_dir: &Path,
    zones: &BTreeMap<String, Vec<MerchantListing>>,
) -> Result<()> {
    for (zone, listings) in zones {
        let path = output_dir.join(format!("{}.json", zone));
        write_pretty_json(&path, listings)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_priced_items() {
        let items = extract_priced_items(
            "Bronze Cap 154-174 gil \nFaceguard 1334-1508 gil \nBronze Harness 235-266 gil",
        );
        assert_eq!(
            items,
            vec![
                PricedItem { item_name: "Bronze Cap".to_string(), min_price: 154, max_price: 174 },
                PricedItem { item_name: "Faceguard".to_string(), min_price: 1334, max_price: 1508 },
                PricedItem {
                    item_name: "Bronze Harness".to_string(),
                    min_price: 235,
                    max_price: 266,
                },
            ]
        );
    }

    #[test]
    fn test_extract_priced_items_empty_blob() {
        assert!(extract_priced_items("").is_empty());
        assert!(extract_priced_items("nothing for sale").is_empty());
    }

    #[test]
    fn test_extract_zone_and_rank() {
        assert_eq!(
            extract_zone_and_rank("Southern San d'Oria (Rank 3)"),
            Some(("Southern San d'Oria".to_string(), "Rank 3".to_string()))
        );
        assert_eq!(extract_zone_and_rank("nowhere"), None);
    }

    #[test]
    fn test_group_by_zone() {
        let records = vec![
            RawMerchantRecord {
                merchant: "Coullene".to_string(),
                merchant_type: "Standard Merchant".to_string(),
                goods_price: "Bronze Cap 154-174 gil".to_string(),
                location: "Southern San d'Oria (J-9)".to_string(),
            },
            RawMerchantRecord {
                merchant: "Boytz".to_string(),
                merchant_type: "Standard Merchant".to_string(),
                goods_price: "Faceguard 1334-1508 gil".to_string(),
                location: "Bastok Markets (E-11)".to_string(),
            },
        ];
        let zones = group_by_zone(build_listings(&records));

        assert_eq!(zones.len(), 2);
        assert_eq!(zones["Bastok Markets"].len(), 1);
        assert_eq!(zones["Southern San d'Oria"][0].merchant, "Coullene");
        assert_eq!(zones["Southern San d'Oria"][0].rank, "J-9");
    }

    #[test]
    fn test_write_zone_files() {
        let dir = tempfile::tempdir().unwrap();
        let listing = MerchantListing {
            merchant: "Coullene".to_string(),
            items: vec![],
            zone: "Ronfaure".to_string(),
            rank: "J-9".to_string(),
        };
        let zones = group_by_zone(vec![listing]);
        write_zone_files(dir.path(), &zones).unwrap();

        let written = std::fs::read_to_string(dir.path().join("Ronfaure.json")).unwrap();
        let parsed: Vec<MerchantListing> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].merchant, "Coullene");
    }
}
