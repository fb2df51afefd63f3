//! Recipe normalization pipeline.
//!
//! Turns an array of raw scraped recipe pages into normalized crafting
//! recipes: extract each field, aggregate skill requirements, pick the main
//! craft, and synthesize a display name.

use crate::extract::{
    extract_craft_type, extract_high_quality_results, extract_recipe_quantity,
    extract_required_items, extract_secondary_skill_levels, extract_tool_requirement,
};
use crate::models::{
    CrystalEntry, Item, NormalizedRecipe, RawRecipeRecord, RecipeResult, SkillLevels,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Maximum length of a per-recipe output file name, extension excluded.
const MAX_RECIPE_FILE_STEM: usize = 120;

/// Merge two skill requirement maps. Keys present on both sides have their
/// levels summed; the scraped dataset encodes same-craft overlaps that way
/// and downstream consumers expect it, so this is not max/overwrite.
pub fn combine_skill_levels(base: SkillLevels, other: SkillLevels) -> SkillLevels {
    let mut combined = base;
    for (craft, level) in other {
        combined
            .entry(craft)
            .and_modify(|existing| *existing += level)
            .or_insert(level);
    }
    combined
}

/// Craft names ordered by required level, highest first. Equal levels tie
/// break alphabetically, which keeps the output deterministic.
pub fn sort_skills_highest_first(skill_levels: &SkillLevels) -> Vec<String> {
    let mut crafts: Vec<String> = skill_levels.keys().cloned().collect();
    // BTreeMap keys come out alphabetically; a stable sort preserves that
    // order among equal levels.
    crafts.sort_by(|a, b| skill_levels[b.as_str()].cmp(&skill_levels[a.as_str()]));
    crafts
}

/// Build the display name: skills highest first as `craft-level`, then the
/// result, then `From` and the `count-item` list. No escaping; item names
/// containing hyphens produce ambiguous but harmless names.
pub fn synthesize_name(
    skill_levels: &SkillLevels,
    required_items: &[Item],
    result: &str,
) -> String {
    let skills: Vec<String> = sort_skills_highest_first(skill_levels)
        .into_iter()
        .map(|craft| {
            let level = skill_levels[craft.as_str()];
            format!("{}-{}", craft, level)
        })
        .collect();

    let items: Vec<String> = required_items
        .iter()
        .map(|item| format!("{}-{}", item.count, item.name))
        .collect();

    format!("{}-{}-From-{}", skills.join("-"), result, items.join(", "))
}

/// Normalize a single raw recipe record.
pub fn normalize_recipe(record: &RawRecipeRecord) -> NormalizedRecipe {
    let craft_type = extract_craft_type(&record.text);
    let level_cap = record.level_cap.trim().parse().unwrap_or(0);

    let mut base = SkillLevels::new();
    if let Some(craft) = &craft_type {
        base.insert(craft.clone(), level_cap);
    }
    let secondary = extract_secondary_skill_levels(&record.other_requirements);
    let skill_levels = combine_skill_levels(base, secondary);

    let sorted_skills = sort_skills_highest_first(&skill_levels);
    let main_craft = sorted_skills.first().cloned().unwrap_or_default();
    if main_craft.is_empty() {
        debug!("No craft type found for recipe {:?}", record.recipe_name);
    }

    let required_items = extract_required_items(&record.synth_or_desynth);
    let name = synthesize_name(&skill_levels, &required_items, &record.recipe_name);

    // HQ tiers first, then the standard result at quality level 0.
    let mut all_possible_results = extract_high_quality_results(&record.ingredients);
    all_possible_results.push(RecipeResult {
        name: record.recipe_item.clone(),
        count: extract_recipe_quantity(&record.recipe_name),
        high_quality_level: 0,
    });

    NormalizedRecipe {
        crystal: record.crystal.clone(),
        required_items,
        skill_levels,
        result: record.recipe_item.clone(),
        name,
        main_craft,
        all_possible_results,
        required_tools: extract_tool_requirement(&record.other_requirements).unwrap_or_default(),
    }
}

/// Normalize a whole scraped collection, preserving input order.
pub fn normalize_recipes(records: &[RawRecipeRecord]) -> Vec<NormalizedRecipe> {
    records.iter().map(normalize_recipe).collect()
}

/// Pull the crystal catalyst out of every raw record, duplicates included.
pub fn extract_crystals(records: &[RawRecipeRecord]) -> Vec<CrystalEntry> {
    records
        .iter()
        .map(|record| CrystalEntry {
            crystal: record.crystal.clone(),
        })
        .collect()
}

/// Every item name the normalized recipes reference (required items, all
/// possible results, crystals), de-duplicated and sorted.
pub fn referenced_item_names(recipes: &[NormalizedRecipe]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for recipe in recipes {
        for item in &recipe.required_items {
            names.insert(item.name.clone());
        }
        for result in &recipe.all_possible_results {
            names.insert(result.name.clone());
        }
        if !recipe.crystal.is_empty() {
            names.insert(recipe.crystal.clone());
        }
    }
    names.into_iter().collect()
}

/// File name for a per-recipe output file, derived from the display name:
/// path-hostile characters replaced, truncated on a char boundary.
pub fn recipe_file_name(display_name: &str) -> String {
    let sanitized: String = display_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .take(MAX_RECIPE_FILE_STEM)
        .collect();
    format!("{}.json", sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(pairs: &[(&str, u32)]) -> SkillLevels {
        pairs
            .iter()
            .map(|(craft, level)| (craft.to_string(), *level))
            .collect()
    }

    #[test]
    fn test_combine_skill_levels_sums_on_collision() {
        let combined = combine_skill_levels(
            skills(&[("Woodworking", 10)]),
            skills(&[("Woodworking", 5)]),
        );
        assert_eq!(combined, skills(&[("Woodworking", 15)]));
    }

    #[test]
    fn test_combine_skill_levels_passes_disjoint_keys_through() {
        let combined = combine_skill_levels(
            skills(&[("Smithing", 14)]),
            skills(&[("Goldsmithing", 2)]),
        );
        assert_eq!(combined, skills(&[("Goldsmithing", 2), ("Smithing", 14)]));
    }

    #[test]
    fn test_sort_skills_highest_first() {
        let ordered = sort_skills_highest_first(&skills(&[
            ("Goldsmithing", 2),
            ("Smithing", 14),
        ]));
        assert_eq!(ordered, vec!["Smithing", "Goldsmithing"]);
    }

    #[test]
    fn test_sort_skills_ties_break_alphabetically() {
        let ordered = sort_skills_highest_first(&skills(&[
            ("Smithing", 10),
            ("Alchemy", 10),
            ("Woodworking", 20),
        ]));
        assert_eq!(ordered, vec!["Woodworking", "Alchemy", "Smithing"]);
    }

    #[test]
    fn test_synthesize_name_single_skill() {
        let name = synthesize_name(
            &skills(&[("Woodworking", 7)]),
            &[Item { name: "Ash Log".to_string(), count: 1 }],
            "Ash Lumber",
        );
        assert_eq!(name, "Woodworking-7-Ash Lumber-From-1-Ash Log");
    }

    #[test]
    fn test_synthesize_name_multiple_skills() {
        let name = synthesize_name(
            &skills(&[("Goldsmithing", 2), ("Smithing", 14)]),
            &[
                Item { name: "Copper Ore".to_string(), count: 2 },
                Item { name: "Fire Crystal".to_string(), count: 1 },
            ],
            "Copper Ingot",
        );
        assert_eq!(
            name,
            "Smithing-14-Goldsmithing-2-Copper Ingot-From-2-Copper Ore, 1-Fire Crystal"
        );
    }

    fn sample_record() -> RawRecipeRecord {
        RawRecipeRecord {
            text: "Guild Recipes: Woodworking".to_string(),
            recipe_name: "Ash Lumber".to_string(),
            recipe_item: "Ash Lumber".to_string(),
            level_cap: "7".to_string(),
            other_requirements: "".to_string(),
            crystal: "Wind Crystal".to_string(),
            synth_or_desynth: "Ash Log".to_string(),
            ingredients: "Ash Log".to_string(),
        }
    }

    #[test]
    fn test_normalize_recipe_basic() {
        let recipe = normalize_recipe(&sample_record());

        assert_eq!(recipe.result, "Ash Lumber");
        assert_eq!(recipe.crystal, "Wind Crystal");
        assert_eq!(recipe.main_craft, "Woodworking");
        assert_eq!(recipe.skill_levels, skills(&[("Woodworking", 7)]));
        assert_eq!(
            recipe.required_items,
            vec![Item { name: "Ash Log".to_string(), count: 1 }]
        );
        assert_eq!(recipe.name, "Woodworking-7-Ash Lumber-From-1-Ash Log");
        assert_eq!(recipe.required_tools, "");
        // Standard result only, at quality level 0.
        assert_eq!(
            recipe.all_possible_results,
            vec![RecipeResult {
                name: "Ash Lumber".to_string(),
                count: 1,
                high_quality_level: 0,
            }]
        );
    }

    #[test]
    fn test_normalize_recipe_with_hq_tiers_and_tool() {
        let record = RawRecipeRecord {
            text: "Guild Recipes: Alchemy".to_string(),
            recipe_name: "Antidote x3".to_string(),
            recipe_item: "Antidote".to_string(),
            level_cap: "20".to_string(),
            other_requirements: "Tool: Triturator\nSmithing(5)".to_string(),
            crystal: "Water Crystal".to_string(),
            synth_or_desynth: "Wijnruit x3, San d'Orian Grape x3, Distilled Water".to_string(),
            ingredients: "HQ1: Antidote x6\nHQ2: Antidote x9\nHQ3: Antidote x12".to_string(),
        };
        let recipe = normalize_recipe(&record);

        assert_eq!(recipe.main_craft, "Alchemy");
        assert_eq!(
            recipe.skill_levels,
            skills(&[("Alchemy", 20), ("Smithing", 5)])
        );
        assert_eq!(recipe.required_tools, "Triturator");
        assert_eq!(recipe.all_possible_results.len(), 4);
        assert_eq!(recipe.all_possible_results[0].high_quality_level, 1);
        assert_eq!(recipe.all_possible_results[3].high_quality_level, 0);
        // Produced quantity comes from the " x3" suffix on the recipe name.
        assert_eq!(recipe.all_possible_results[3].count, 3);
    }

    #[test]
    fn test_normalize_recipe_without_any_skills() {
        let mut record = sample_record();
        record.text = "No guild header here".to_string();
        let recipe = normalize_recipe(&record);

        assert!(recipe.skill_levels.is_empty());
        assert_eq!(recipe.main_craft, "");
        assert_eq!(recipe.name, "-Ash Lumber-From-1-Ash Log");
    }

    #[test]
    fn test_extract_crystals_preserves_duplicates() {
        let records = vec![sample_record(), sample_record()];
        let crystals = extract_crystals(&records);
        assert_eq!(crystals.len(), 2);
        assert_eq!(crystals[0].crystal, "Wind Crystal");
        assert_eq!(crystals[1].crystal, "Wind Crystal");
    }

    #[test]
    fn test_referenced_item_names_dedups_and_sorts() {
        let recipes = normalize_recipes(&[sample_record(), sample_record()]);
        let names = referenced_item_names(&recipes);
        assert_eq!(names, vec!["Ash Log", "Ash Lumber", "Wind Crystal"]);
    }

    #[test]
    fn test_recipe_file_name_truncates_and_sanitizes() {
        let long = "a".repeat(500);
        let file = recipe_file_name(&long);
        assert_eq!(file.len(), MAX_RECIPE_FILE_STEM + ".json".len());

        let file = recipe_file_name("Woodworking-7-A/B-From-1-C");
        assert!(!file.contains('/'));
        assert!(file.ends_with(".json"));
    }
}
