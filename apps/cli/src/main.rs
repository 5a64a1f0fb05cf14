use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use string_migrator_core::{
    builtin_table, list_tables, load_table_file, migrate_file, MigrationOptions,
    SubstitutionTable,
};

/// Apply an ordered list of literal string substitutions to a file in place.
#[derive(Debug, Parser)]
#[command(name = "string-migrator", version, about)]
struct Args {
    /// File to rewrite
    #[arg(required_unless_present = "list_tables")]
    path: Option<PathBuf>,

    /// Built-in table to apply
    #[arg(long, default_value = "order-history", conflicts_with = "table_file")]
    table: String,

    /// JSON file with `[{"search": .., "replace": ..}]` rules, applied in order
    #[arg(long, value_name = "FILE")]
    table_file: Option<PathBuf>,

    /// Report what would change without writing the file
    #[arg(long)]
    dry_run: bool,

    /// Copy the original to `<file>.bak.<timestamp>` before overwriting
    #[arg(long)]
    backup: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Print the built-in table ids and exit
    #[arg(long)]
    list_tables: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn load_table(args: &Args) -> Result<SubstitutionTable> {
    let table = match &args.table_file {
        Some(file) => load_table_file(file)
            .with_context(|| format!("failed to load table from {}", file.display()))?,
        None => builtin_table(&args.table)?,
    };
    info!("loaded {} rule(s)", table.len());

    let rules = table.rules();
    for (earlier, later) in table.chains() {
        warn!(
            "rule #{earlier} inserts {:?}, which rule #{later} ({:?}) will rewrite",
            rules[earlier].replace, rules[later].search
        );
    }
    Ok(table)
}

fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    if args.list_tables {
        for profile in list_tables() {
            writeln!(
                out,
                "{}\t{} ({} rules)",
                profile.id,
                profile.description,
                profile.table.len()
            )?;
        }
        return Ok(());
    }

    let Some(path) = args.path.as_deref() else {
        anyhow::bail!("no file given");
    };
    let table = load_table(args)?;
    let options = MigrationOptions {
        dry_run: args.dry_run,
        backup: args.backup,
    };

    let report = migrate_file(path, &table, &options)
        .with_context(|| format!("failed to translate {}", path.display()))?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else if options.dry_run {
        writeln!(
            out,
            "Dry run: {} replacement(s) from {} rule(s), file not written.",
            report.total_replacements,
            report.rules_applied - report.unmatched_rules
        )?;
    } else {
        writeln!(out, "Translation completed.")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args, &mut io::stdout().lock())
}
