//! Regex-driven field extractors for scraped recipe text.
//!
//! Every extractor is a pure, single-pass function over one text fragment.
//! A failed match is a valid result (`None` or an empty collection), never
//! an error; the scraped pages are too irregular for anything stricter.

use crate::models::{Item, RecipeResult, SkillLevels};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CRAFT_TYPE_RE: Regex = Regex::new(r"Guild Recipes: (\w+)").unwrap();
    static ref TOOL_RE: Regex = Regex::new(r"Tool: (.*)").unwrap();
    static ref SKILL_LEVEL_RE: Regex = Regex::new(r"(\w+)\((\d+)\)").unwrap();
    static ref ITEM_COUNT_RE: Regex = Regex::new(r" x(\d+)$").unwrap();
    static ref HQ_RESULT_RE: Regex = Regex::new(r"HQ(\d+): (.*?)(?: x(\d+))?$").unwrap();
}

/// Extract the craft discipline from the page header text,
/// e.g. `"Guild Recipes: Woodworking"` yields `Some("Woodworking")`.
pub fn extract_craft_type(text: &str) -> Option<String> {
    CRAFT_TYPE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the required tool from the "other requirements" blob,
/// e.g. `"Tool: Triturator"` yields `Some("Triturator")`.
pub fn extract_tool_requirement(text: &str) -> Option<String> {
    TOOL_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract secondary skill requirements written as `Craft(level)`.
///
/// Returns an empty map when no such substrings exist. A repeated craft
/// name keeps the last occurrence.
pub fn extract_secondary_skill_levels(requirements: &str) -> SkillLevels {
    let mut skill_levels = SkillLevels::new();
    for caps in SKILL_LEVEL_RE.captures_iter(requirements) {
        let craft = caps[1].to_string();
        let level = caps[2].parse().unwrap_or(0);
        skill_levels.insert(craft, level);
    }
    skill_levels
}

/// Extract the comma-separated ingredient list, honoring a trailing
/// ` x<n>` count suffix per item. Input order and duplicates are preserved;
/// empty segments (stray commas) are dropped.
pub fn extract_required_items(items_text: &str) -> Vec<Item> {
    let mut items = Vec::new();
    for segment in items_text.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some(caps) = ITEM_COUNT_RE.captures(segment) {
            let count = caps[1].parse().unwrap_or(1);
            let suffix_start = caps.get(0).map_or(segment.len(), |m| m.start());
            let name = segment[..suffix_start].trim().to_string();
            items.push(Item { name, count });
        } else {
            items.push(Item {
                name: segment.to_string(),
                count: 1,
            });
        }
    }
    items
}

/// Extract high-quality result tiers from the ingredient blob.
///
/// Each line of the form `HQ<tier>: <name>[ x<count>]` yields one result;
/// lines that do not match are silently skipped. A `+1` quality suffix on
/// the item name is part of the name, not a count.
pub fn extract_high_quality_results(ingredients: &str) -> Vec<RecipeResult> {
    let mut results = Vec::new();
    for line in ingredients.split('\n') {
        if let Some(caps) = HQ_RESULT_RE.captures(line) {
            let tier = caps[1].parse().unwrap_or(0);
            let name = caps[2].to_string();
            let count = caps
                .get(3)
                .map(|m| m.as_str().parse().unwrap_or(1))
                .unwrap_or(1);
            results.push(RecipeResult {
                name,
                count,
                high_quality_level: tier,
            });
        }
    }
    results
}

/// Extract the produced quantity from a trailing ` x<n>` on the result
/// item name; 1 when no suffix is present.
pub fn extract_recipe_quantity(item_name: &str) -> u32 {
    ITEM_COUNT_RE
        .captures(item_name)
        .map(|caps| caps[1].parse().unwrap_or(1))
        .unwrap_or(1)
}
