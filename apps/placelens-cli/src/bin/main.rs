use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use placelens_core::config::Config;
use placelens_core::types::{CategoryContext, CategoryGroup, MatchedCandidate, StructuredTags};
use placelens_facets::FacetDictionary;
use placelens_layout::{MatchLimiter, MatchLimits};
use placelens_tags::{compose_bilingual, TagGenerator};
use serde::Deserialize;

/// One place record as scraped/extracted upstream.
#[derive(Deserialize)]
struct PlaceRecord {
    name: String,
    category: CategoryContext,
    #[serde(default)]
    tags: StructuredTags,
}

/// Input for the `layout` command.
#[derive(Deserialize)]
struct LayoutRequest {
    #[serde(default)]
    matched: Vec<MatchedCandidate>,
    #[serde(default)]
    unmatched: Vec<MatchedCandidate>,
    groups: Option<Vec<CategoryGroup>>,
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <enrich|layout> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn load_dictionary(config: &Config) -> anyhow::Result<FacetDictionary> {
    match config.get::<String>("facets.table_path") {
        Ok(path) => FacetDictionary::from_toml_file(Path::new(&path)),
        Err(_) => Ok(FacetDictionary::builtin()),
    }
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "enrich" => {
            let data_dir = args.first().map(PathBuf::from).unwrap_or_else(|| {
                let dir: String = config
                    .get("data.places_dir")
                    .unwrap_or_else(|_| "./dev_data/places".to_string());
                PathBuf::from(dir)
            });
            let dict = load_dictionary(&config)?;
            println!("Enriching place records from {}", data_dir.display());
            let files = list_json_files(&data_dir);
            if files.is_empty() {
                println!("No .json files found under {}.", data_dir.display());
                return Ok(());
            }
            let generator = TagGenerator::new(&dict);
            let rt = tokio::runtime::Runtime::new()?;
            for file in &files {
                let record: PlaceRecord = serde_json::from_str(&fs::read_to_string(file)?)?;
                // No resolver wired in the demo CLI; entity rules are skipped.
                let ai_tags =
                    rt.block_on(generator.generate(Some(&record.tags), &record.category, None));
                let display = compose_bilingual(
                    &record.category.label_en,
                    &record.category.label_zh,
                    &ai_tags,
                );
                println!("📍 {}", record.name);
                println!("   en: {}", display.en.join(" · "));
                println!("   zh: {}", display.zh.join(" · "));
            }
            println!("✅ Enriched {} places", files.len());
        }
        "layout" => {
            let input = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: placelens-cli layout <request.json>");
                std::process::exit(1)
            });
            let request: LayoutRequest = serde_json::from_str(&fs::read_to_string(&input)?)?;
            let limits = MatchLimits {
                min_per_category: config.get("layout.min_per_category").unwrap_or(2),
                max_per_category: config.get("layout.max_per_category").unwrap_or(5),
                max_total: config.get("layout.max_total").unwrap_or(5),
            };
            let limiter = MatchLimiter::with_limits(limits);
            let layout = limiter.limit(
                &request.matched,
                &request.unmatched,
                request.groups.as_deref(),
            );
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
