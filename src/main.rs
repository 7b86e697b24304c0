use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

use org_rank::config::Config;
use org_rank::input::{default_label, SourceSpec};
use org_rank::output::ExportFormat;
use org_rank::scoring::validate_sources;
use org_rank::{RankError, ScoringParams, SourceInfo};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

const DEFAULT_EXPORT_NAME: &str = "unternehmensvergleich_ergebnis.xlsx";

#[derive(Parser, Debug)]
#[command(name = "org-rank")]
#[command(about = "Rank organizations across spreadsheet exports by presence and online reputation", long_about = None)]
#[command(version)]
struct Cli {
    /// Source files (2 to 4): CSV/TSV or Excel
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Source labels by position (defaults to "Datei 1", "Datei 2", ...)
    #[arg(short, long = "label")]
    labels: Vec<String>,

    /// Source weights by position, comma-separated (e.g. "1,2,0.5")
    #[arg(long, value_delimiter = ',')]
    weights: Vec<f64>,

    /// Weight for one source by label, repeatable (e.g. "Google=2")
    #[arg(short, long = "weight", value_parser = parse_label_weight)]
    weight: Vec<(String, f64)>,

    /// Ask for each source's weight on the terminal
    #[arg(short, long)]
    interactive: bool,

    /// Export the ranking to this file (defaults to unternehmensvergleich_ergebnis.xlsx
    /// next to the first input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the file export
    #[arg(long, conflicts_with = "output")]
    no_export: bool,

    /// Export format (csv, tsv, json, xlsx); defaults to the output file's extension
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Write scatter-plot series (frequency/reputation vs. final score) as JSON
    #[arg(long)]
    plot_data: Option<PathBuf>,

    /// Print the ranking as tab-separated values
    #[arg(long)]
    tsv: bool,

    /// Enable verbose logging and per-organization details
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/org-rank/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_label_weight(s: &str) -> Result<(String, f64), String> {
    let (label, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=WEIGHT, got '{}'", s))?;
    let weight = weight
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| format!("invalid weight in '{}': {}", s, e))?;
    Ok((label.trim().to_string(), weight))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "org_rank=debug" } else { "org_rank=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(err: &RankError) -> i32 {
    match err {
        RankError::Configuration(_) => EXIT_CONFIG,
        RankError::InputCount(_) | RankError::Read { .. } => EXIT_INPUT,
        RankError::Export { .. } => EXIT_OUTPUT,
    }
}

fn fail(err: RankError) -> ! {
    match &err {
        RankError::Configuration(errors) => {
            eprintln!("Configuration errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
        }
        other => eprintln!("Error: {}", other),
    }
    std::process::exit(exit_code(&err));
}

/// Export path used without `--output`: beside the first input file.
fn default_output_path(first_input: &Path) -> PathBuf {
    first_input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_EXPORT_NAME)
}

/// Export target from `--output`/`--format`, the default path, or `None`
/// with `--no-export`. Fails when no format can be inferred.
fn resolve_export(cli: &Cli) -> Result<Option<(PathBuf, ExportFormat)>, String> {
    if cli.no_export {
        return Ok(None);
    }
    let path = match (&cli.output, cli.files.first()) {
        (Some(path), _) => path.clone(),
        (None, Some(first)) => default_output_path(first),
        (None, None) => return Ok(None),
    };
    match cli.format.or_else(|| ExportFormat::from_path(&path)) {
        Some(format) => Ok(Some((path, format))),
        None => Err(format!(
            "Cannot infer export format from {}; pass --format (csv, tsv, json, xlsx)",
            path.display()
        )),
    }
}

/// Resolve label and weight for every input file: CLI flags win over the
/// config file, which wins over the defaults.
fn build_specs(cli: &Cli, config: &Config) -> Result<Vec<SourceSpec>, RankError> {
    let mut specs: Vec<SourceSpec> = cli
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let from_config = config.source(i);
            let label = cli
                .labels
                .get(i)
                .cloned()
                .or_else(|| from_config.and_then(|s| s.label.clone()))
                .unwrap_or_else(|| default_label(i));
            let weight = cli
                .weights
                .get(i)
                .copied()
                .or_else(|| from_config.and_then(|s| s.weight))
                .unwrap_or(1.0);
            SourceSpec {
                path: path.clone(),
                label,
                weight,
            }
        })
        .collect();

    let mut errors = Vec::new();
    for (label, weight) in &cli.weight {
        match specs.iter_mut().find(|s| &s.label == label) {
            Some(spec) => spec.weight = *weight,
            None => errors.push(format!("--weight {}: no source with that label", label)),
        }
    }
    if !errors.is_empty() {
        return Err(RankError::Configuration(errors));
    }
    Ok(specs)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config = match org_rank::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring parameters before touching any source
    let params = ScoringParams::from_config(&config.scoring()).unwrap_or_else(|e| fail(e));
    let aliases = config.columns();

    let file_count = cli.files.len();
    if !(org_rank::error::MIN_SOURCES..=org_rank::error::MAX_SOURCES).contains(&file_count) {
        fail(RankError::InputCount(file_count));
    }

    let mut specs = build_specs(&cli, &config).unwrap_or_else(|e| fail(e));

    if cli.interactive {
        if let Err(e) = org_rank::prompt::prompt_weights(&mut specs) {
            eprintln!("Prompt error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }

    let infos: Vec<SourceInfo> = specs
        .iter()
        .map(|s| SourceInfo {
            label: s.label.clone(),
            weight: s.weight,
        })
        .collect();
    if let Err(errors) = validate_sources(&infos) {
        fail(RankError::Configuration(errors));
    }

    // Resolve the export format up front so a bad extension fails before reading
    let export = resolve_export(&cli).unwrap_or_else(|message| {
        eprintln!("{}", message);
        std::process::exit(EXIT_CONFIG);
    });

    let tables = org_rank::input::read_sources(&specs).unwrap_or_else(|e| fail(e));
    let ranking = org_rank::rank_sources(&tables, &params, &aliases).unwrap_or_else(|e| fail(e));

    if cli.tsv {
        let output = org_rank::output::format_tsv(&ranking);
        if !output.is_empty() {
            println!("{}", output);
        }
    } else {
        let use_colors = org_rank::output::should_use_colors();
        println!("{}", org_rank::output::format_source_legend(&ranking));
        println!("{}", org_rank::output::format_ranking_table(&ranking, use_colors));

        if cli.verbose {
            for entry in &ranking.entries {
                println!();
                println!("{}", org_rank::output::format_entry_detail(&ranking, entry, use_colors));
            }
        }
    }

    if let Some((path, format)) = export {
        org_rank::output::export_ranking(&ranking, &path, format).unwrap_or_else(|e| fail(e));
        eprintln!("Ranking saved to {}", path.display());
    }

    if let Some(path) = &cli.plot_data {
        let series = org_rank::output::plot_series(&ranking);
        org_rank::output::export_plot_data(&series, path).unwrap_or_else(|e| fail(e));
    }

    if cli.verbose {
        eprintln!();
        eprintln!(
            "Total: {} organizations from {} sources in {:?}",
            ranking.len(),
            ranking.sources.len(),
            start_time.elapsed()
        );
    }

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_rank::config::SourceConfig;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("org-rank").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_label_weight() {
        assert_eq!(parse_label_weight("Google=2").unwrap(), ("Google".to_string(), 2.0));
        assert_eq!(parse_label_weight("Datei 1 = 0,5").unwrap(), ("Datei 1".to_string(), 0.5));
        assert!(parse_label_weight("Google").is_err());
        assert!(parse_label_weight("Google=viel").is_err());
    }

    #[test]
    fn test_default_specs() {
        let specs = build_specs(&cli(&["a.csv", "b.xlsx"]), &Config::default()).unwrap();
        assert_eq!(specs[0].label, "Datei 1");
        assert_eq!(specs[1].label, "Datei 2");
        assert!(specs.iter().all(|s| s.weight == 1.0));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            sources: vec![
                SourceConfig { label: Some("Google".to_string()), weight: Some(3.0) },
                SourceConfig { label: Some("Yelp".to_string()), weight: Some(4.0) },
            ],
            ..Default::default()
        };
        let args = cli(&["a.csv", "b.csv", "--weights", "2", "-w", "Yelp=0.5"]);
        let specs = build_specs(&args, &config).unwrap();
        assert_eq!(specs[0].label, "Google");
        assert_eq!(specs[0].weight, 2.0);
        assert_eq!(specs[1].weight, 0.5);
    }

    #[test]
    fn test_unknown_weight_label() {
        let args = cli(&["a.csv", "b.csv", "-w", "Nope=1"]);
        let result = build_specs(&args, &Config::default());
        assert!(matches!(result, Err(RankError::Configuration(_))));
    }

    #[test]
    fn test_default_export_beside_first_input() {
        let export = resolve_export(&cli(&["daten/google.xlsx", "yelp.csv"])).unwrap();
        assert_eq!(
            export,
            Some((PathBuf::from("daten").join(DEFAULT_EXPORT_NAME), ExportFormat::Xlsx))
        );

        let bare = resolve_export(&cli(&["google.xlsx", "yelp.csv"])).unwrap();
        assert_eq!(bare, Some((PathBuf::from(DEFAULT_EXPORT_NAME), ExportFormat::Xlsx)));
    }

    #[test]
    fn test_explicit_export_and_opt_out() {
        let export = resolve_export(&cli(&["a.csv", "b.csv", "-o", "out.json"])).unwrap();
        assert_eq!(export, Some((PathBuf::from("out.json"), ExportFormat::Json)));

        let forced = resolve_export(&cli(&["a.csv", "b.csv", "-o", "out.txt", "-f", "tsv"])).unwrap();
        assert_eq!(forced, Some((PathBuf::from("out.txt"), ExportFormat::Tsv)));

        assert!(resolve_export(&cli(&["a.csv", "b.csv", "-o", "out.txt"])).is_err());
        assert_eq!(resolve_export(&cli(&["a.csv", "b.csv", "--no-export"])).unwrap(), None);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&RankError::InputCount(1)), EXIT_INPUT);
        assert_eq!(exit_code(&RankError::Configuration(vec![])), EXIT_CONFIG);
    }
}
