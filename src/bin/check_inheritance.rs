use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use mendelian::cli;
use mendelian::config::AnalysisConfig;
use mendelian::inheritance::analyser::{InheritanceModeAnalyser, group_by_gene};
use mendelian::inheritance::annotator::InheritanceModeAnnotator;
use mendelian::input;
use mendelian::perf::RunStats;
use mendelian::region::index::ChromosomalRegionIndex;

#[derive(Parser)]
#[command(
    name = "check_inheritance",
    about = "Report the modes of inheritance each gene's variants are compatible with"
)]
struct Cli {
    /// Path to the JSON cohort file (.json or .json.gz)
    #[arg(short = 'i', long = "cohort")]
    cohort: PathBuf,

    /// Path to the JSON analysis configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Path to a JSON file of topological domains
    #[arg(short = 't', long = "tads")]
    tads: Option<PathBuf>,

    /// Only print genes compatible with at least one mode
    #[arg(long)]
    compatible_only: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli_args = Cli::parse();

    cli::banner("Check Inheritance");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = match &cli_args.config {
        Some(path) => {
            cli::kv("Config", &path.display().to_string());
            AnalysisConfig::from_file(path)?
        }
        None => AnalysisConfig::default(),
    };
    let options = config.inheritance_mode_options()?;
    let penetrance = config.penetrance();

    for sub_mode in options.defined_sub_modes() {
        cli::kv(
            &sub_mode.to_string().to_lowercase(),
            &format!("{}%", options.max_freq_for_sub_mode(sub_mode)),
        );
    }
    cli::kv("Penetrance", &format!("{penetrance:?}"));
    eprintln!();

    // ── Cohort ───────────────────────────────────────────
    cli::section("Cohort");

    let cohort = input::load_cohort(&cli_args.cohort, config.proband.as_deref())?;
    cli::kv("Cohort", &cli_args.cohort.display().to_string());
    cli::kv("Proband", &cohort.proband);
    cli::kv("Individuals", &cohort.pedigree.len().to_string());
    cli::kv("Affected", &cohort.pedigree.affected().count().to_string());
    cli::kv("Variants", &cohort.variants.len().to_string());

    let failed = cohort.variants.iter().filter(|v| !v.passed_filters).count();
    if failed > 0 {
        cli::warning(&format!("{failed} variants failed upstream filters and are skipped"));
    }

    let domains = match &cli_args.tads {
        Some(path) => {
            let domains = input::load_topological_domains(path)?;
            cli::kv("TADs", &domains.len().to_string());
            domains
        }
        None => ChromosomalRegionIndex::empty(),
    };
    eprintln!();

    // ── Analysis ─────────────────────────────────────────
    cli::section("Analysis");

    let variant_count = cohort.variants.len();
    let genes = group_by_gene(cohort.variants);
    let annotator = InheritanceModeAnnotator::new(&cohort.pedigree, &options).with_penetrance(penetrance);
    let compatible = InheritanceModeAnalyser::new(annotator).analyse_genes(&genes);

    cli::kv("Genes", &genes.len().to_string());
    cli::success(&format!("{compatible} genes compatible with at least one mode"));
    eprintln!();

    // ── Results ──────────────────────────────────────────
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "#gene\tvariant\tmodes\tdomain_genes").context("failed to write results")?;

    for gene in &genes {
        let modes = gene.compatible_modes();
        if cli_args.compatible_only && modes.is_empty() {
            continue;
        }
        for variant in gene.variants() {
            let domain_genes: Vec<&str> = domains
                .regions_containing_variant(variant)
                .into_iter()
                .flat_map(|domain| domain.genes().keys().map(String::as_str))
                .collect();
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                gene.symbol(),
                variant.key(),
                cli::format_modes(&gene.variant_modes(variant)),
                if domain_genes.is_empty() {
                    "-".to_string()
                } else {
                    domain_genes.join(",")
                }
            )
            .context("failed to write results")?;
        }
        for (first, second) in gene.comp_het_pairs() {
            writeln!(out, "{}\t{first}+{second}\tCOMP_HET\t-", gene.symbol())
                .context("failed to write results")?;
        }
    }
    out.flush().context("failed to write results")?;

    eprintln!("{}", "Done".bold().green());
    cli::print_summary(&RunStats::capture(start, genes.len(), variant_count));

    Ok(())
}
