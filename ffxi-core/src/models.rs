//! Data models for scraped FFXI game data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw recipe page as scraped from the crafting guild wiki.
///
/// Field names match the scraped dataset exactly; every field is required so
/// that a schema mismatch fails at load time instead of silently defaulting.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecipeRecord {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "recipe_name")]
    pub recipe_name: String,
    #[serde(rename = "recipe_item")]
    pub recipe_item: String,
    #[serde(rename = "level_cap")]
    pub level_cap: String,
    #[serde(rename = "other_requirements")]
    pub other_requirements: String,
    #[serde(rename = "crystal")]
    pub crystal: String,
    #[serde(rename = "synth_or_desynth")]
    pub synth_or_desynth: String,
    #[serde(rename = "ingredients")]
    pub ingredients: String,
}

/// An item together with how many of it a recipe consumes or produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Count")]
    pub count: u32,
}

/// One possible outcome of a synthesis. `high_quality_level` 0 is the
/// standard result; 1 through 3 are the HQ tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Count")]
    pub count: u32,
    #[serde(rename = "HighQualityLevel")]
    pub high_quality_level: u32,
}

/// Mapping from craft discipline to minimum skill level. A `BTreeMap` keeps
/// iteration (and JSON output) deterministic.
pub type SkillLevels = BTreeMap<String, u32>;

/// A fully normalized crafting recipe, derived from one `RawRecipeRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecipe {
    #[serde(rename = "Crystal")]
    pub crystal: String,
    #[serde(rename = "RequiredItems")]
    pub required_items: Vec<Item>,
    #[serde(rename = "SkillLevels")]
    pub skill_levels: SkillLevels,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MainCraft")]
    pub main_craft: String,
    #[serde(rename = "AllPossibleResults")]
    pub all_possible_results: Vec<RecipeResult>,
    #[serde(rename = "RequiredTools")]
    pub required_tools: String,
}

/// Crystal catalyst of one recipe, emitted by the crystal extraction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrystalEntry {
    #[serde(rename = "Crystal")]
    pub crystal: String,
}

/// One raw merchant page as scraped.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMerchantRecord {
    #[serde(rename = "merchant")]
    pub merchant: String,
    #[serde(rename = "type")]
    pub merchant_type: String,
    #[serde(rename = "goodsPrice")]
    pub goods_price: String,
    #[serde(rename = "location")]
    pub location: String,
}

/// An item a merchant sells, with its price range in gil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedItem {
    #[serde(rename = "ItemName")]
    pub item_name: String,
    #[serde(rename = "MinPrice")]
    pub min_price: u32,
    #[serde(rename = "MaxPrice")]
    pub max_price: u32,
}

/// Normalized merchant record, grouped by zone on output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantListing {
    #[serde(rename = "Merchant")]
    pub merchant: String,
    #[serde(rename = "Items")]
    pub items: Vec<PricedItem>,
    #[serde(rename = "Zone")]
    pub zone: String,
    #[serde(rename = "Rank")]
    pub rank: String,
}

/// One scraped drop-rate record, keyed by (item, mob, zone).
#[derive(Debug, Clone, Deserialize)]
pub struct DropRateRecord {
    #[serde(rename = "Name")]
    pub item_name: String,
    #[serde(rename = "NPC")]
    pub npc: String,
    #[serde(rename = "Zone")]
    pub zone: String,
    #[serde(rename = "Count")]
    pub count: String,
    #[serde(rename = "Chance")]
    pub chance: String,
    #[serde(rename = "Page_URL")]
    pub page_url: String,
}

/// Mob level range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    #[serde(rename = "Min")]
    pub min: i32,
    #[serde(rename = "Max")]
    pub max: i32,
}

/// One item a mob can drop, with observed drop statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDrop {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Percent")]
    pub percent: f64,
    #[serde(rename = "AmountDropped")]
    pub amount_dropped: i32,
    #[serde(rename = "AmountDefeated")]
    pub amount_defeated: i32,
}

/// One mob entry from a per-zone file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LevelRange")]
    pub level_range: LevelRange,
    #[serde(rename = "ZoneName")]
    pub zone_name: String,
    #[serde(rename = "ItemDrops")]
    pub item_drops: Vec<ItemDrop>,
}
