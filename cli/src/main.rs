use anyhow::Result;
use clap::{Parser, Subcommand};
use ffxi_core::file_utils::{read_json_array, write_pretty_json, write_text};
use ffxi_core::merchants::{build_listings, group_by_zone, write_zone_files};
use ffxi_core::mobdrops::{load_drop_rates, merge_drop_chances};
use ffxi_core::models::{MobRecord, RawMerchantRecord, RawRecipeRecord};
use ffxi_core::recipe::{
    extract_crystals, normalize_recipes, recipe_file_name, referenced_item_names,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "ffxi",
    version = "0.1.0",
    about = "CLI tool for normalizing scraped FFXI game data",
    long_about = None
)]
struct Cli {
    /// Path to log file
    #[arg(long, global = true, default_value = "/tmp/ffxi-tools.log")]
    log_file: std::path::PathBuf,

    /// Verbosity level (repeat for more verbose output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize scraped recipe pages into crafting recipes
    TransformRecipes {
        /// JSON file with the scraped recipe array
        #[arg(long)]
        input: std::path::PathBuf,
        /// Output JSON file
        #[arg(long)]
        output: std::path::PathBuf,
    },

    /// Extract the crystal catalyst of every scraped recipe
    ExtractCrystals {
        /// JSON file with the scraped recipe array
        #[arg(long)]
        input: std::path::PathBuf,
        /// Output JSON file
        #[arg(long)]
        output: std::path::PathBuf,
    },

    /// Write each normalized recipe to its own JSON file
    ExportRecipes {
        /// JSON file with the scraped recipe array
        #[arg(long)]
        input: std::path::PathBuf,
        /// Directory for per-recipe files
        #[arg(long)]
        output_dir: std::path::PathBuf,
    },

    /// Write a de-duplicated list of every referenced item name
    ListItems {
        /// JSON file with the scraped recipe array
        #[arg(long)]
        input: std::path::PathBuf,
        /// Output text file, one item name per line
        #[arg(long)]
        output: std::path::PathBuf,
    },

    /// Group scraped merchant pages into per-zone price lists
    GroupMerchants {
        /// JSON file with the scraped merchant array
        #[arg(long)]
        input: std::path::PathBuf,
        /// Directory for per-zone files
        #[arg(long)]
        output_dir: std::path::PathBuf,
    },

    /// Merge scraped drop rates into per-zone mob files
    MergeMobDrops {
        /// JSON file with scraped drop-rate records (single-quoted)
        #[arg(long)]
        drop_rates: std::path::PathBuf,
        /// Directory containing <zone>.json mob files
        #[arg(long, default_value = ".")]
        zone_dir: std::path::PathBuf,
        /// Zone names to process (file stem, e.g. Valkurm_Dunes)
        #[arg(long, required = true)]
        zone: Vec<String>,
        /// Directory for <zone>_output.json files
        #[arg(long, default_value = ".")]
        output_dir: std::path::PathBuf,
    },
}

fn setup_logging(
    verbose: u8,
    log_file: &std::path::Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let filter_level = match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(filter_level.into());

    let file_appender = tracing_appender::rolling::never(
        log_file.parent().unwrap_or(std::path::Path::new(".")),
        log_file.file_name().unwrap_or(std::ffi::OsStr::new("ffxi.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::Layer::new().with_writer(std::io::stderr).with_ansi(true))
        .with(fmt::Layer::new().with_writer(non_blocking).with_ansi(false));

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = setup_logging(cli.verbose, &cli.log_file)?;

    info!("Starting ffxi CLI");

    match cli.command {
        Commands::TransformRecipes { input, output } => {
            let records: Vec<RawRecipeRecord> = read_json_array(&input)?;
            info!("Read {} raw recipe records from {:?}", records.len(), input);

            let recipes = normalize_recipes(&records);
            write_pretty_json(&output, &recipes)?;
            info!("Wrote {} normalized recipes to {:?}", recipes.len(), output);
        }
        Commands::ExtractCrystals { input, output } => {
            let records: Vec<RawRecipeRecord> = read_json_array(&input)?;
            let crystals = extract_crystals(&records);
            write_pretty_json(&output, &crystals)?;
            info!("Wrote {} crystal entries to {:?}", crystals.len(), output);
        }
        Commands::ExportRecipes { input, output_dir } => {
            let records: Vec<RawRecipeRecord> = read_json_array(&input)?;
            let recipes = normalize_recipes(&records);

            std::fs::create_dir_all(&output_dir)?;
            for recipe in &recipes {
                let path = output_dir.join(recipe_file_name(&recipe.name));
                write_pretty_json(&path, recipe)?;
            }
            info!("Wrote {} recipe files to {:?}", recipes.len(), output_dir);
        }
        Commands::ListItems { input, output } => {
            let records: Vec<RawRecipeRecord> = read_json_array(&input)?;
            let recipes = normalize_recipes(&records);
            let names = referenced_item_names(&recipes);

            let mut text = names.join("\n");
            text.push('\n');
            write_text(&output, &text)?;
            info!("Wrote {} item names to {:?}", names.len(), output);
        }
        Commands::GroupMerchants { input, output_dir } => {
            let records: Vec<RawMerchantRecord> = read_json_array(&input)?;
            info!("Read {} merchant records from {:?}", records.len(), input);

            let zones = group_by_zone(build_listings(&records));
            std::fs::create_dir_all(&output_dir)?;
            write_zone_files(&output_dir, &zones)?;
            info!("Wrote {} zone files to {:?}", zones.len(), output_dir);
        }
        Commands::MergeMobDrops {
            drop_rates,
            zone_dir,
            zone,
            output_dir,
        } => {
            let rates = load_drop_rates(&drop_rates)?;
            info!("Read {} drop-rate records from {:?}", rates.len(), drop_rates);

            std::fs::create_dir_all(&output_dir)?;
            for zone_name in &zone {
                let input_path = zone_dir.join(format!("{}.json", zone_name));
                let mut mobs: Vec<MobRecord> = read_json_array(&input_path)?;

                merge_drop_chances(&mut mobs, &rates);

                let output_path = output_dir.join(format!("{}_output.json", zone_name));
                write_pretty_json(&output_path, &mobs)?;
                info!(
                    "Wrote {} mobs for zone {} to {:?}",
                    mobs.len(),
                    zone_name,
                    output_path
                );
            }
        }
    }

    info!("ffxi CLI finished");
    Ok(())
}
