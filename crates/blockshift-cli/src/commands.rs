use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context};
use colored::Colorize;
use serde_json::json;

use blockshift_diff::{diff_lines, FeatureExtractor, FeatureRecord, Transition};
use blockshift_history::{
    count_flags, discover_projects, load_snapshot, process_project, reduce_field_changes,
    write_csv, write_json, write_playback_json, FlagCounts, HistoryConfig,
};
use blockshift_tree::Snapshot;
use blockshift_types::Feature;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => HistoryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HistoryConfig::default(),
    };
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config, &cli.format),
        Command::Project(args) => cmd_project(args, &config, &cli.format),
        Command::Count(args) => cmd_count(args, &config, &cli.format),
        Command::Scan(args) => cmd_scan(args, &config, &cli.format),
    }
}

fn read_blocks(path: &Path, config: &HistoryConfig) -> anyhow::Result<(String, Snapshot)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    load_snapshot(&text, config.repair_trailing_garbage)
        .map_err(|reason| anyhow!("{}: {reason}", path.display()))
}

fn print_features(features: &FeatureRecord) {
    if features.is_empty() {
        println!("  {}", "no changes".dimmed());
        return;
    }
    for feature in features.flagged() {
        let ids: Vec<&str> = features.list(feature).iter().map(|id| id.as_str()).collect();
        println!("  {:<16} {}", feature.as_str().cyan(), ids.join(", "));
    }
}

fn print_diff_line(line: &str) {
    if line.starts_with("+ ") {
        println!("    {}", line.green());
    } else if line.starts_with("- ") {
        println!("    {}", line.red());
    } else {
        println!("    {}", line.dimmed());
    }
}

fn cmd_diff(
    args: DiffArgs,
    config: &HistoryConfig,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let (prev_text, prev) = read_blocks(&args.prev, config)?;
    let (cur_text, cur) = read_blocks(&args.cur, config)?;
    let extractor = FeatureExtractor::new(config.extract.clone());
    let features = extractor.extract(&Transition::new(&prev, &cur))?;
    let diff = args.text_diff.then(|| diff_lines(&prev_text, &cur_text).render());

    match format {
        OutputFormat::Json => {
            let out = json!({ "features": features, "diff": diff });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!(
                "{} -> {}",
                args.prev.display().to_string().bold(),
                args.cur.display().to_string().bold()
            );
            print_features(&features);
            for line in diff.iter().flatten() {
                print_diff_line(line);
            }
        }
    }
    Ok(())
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

fn write_file<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> blockshift_history::HistoryResult<()>,
{
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("writing {}", path.display()))?;
    out.flush()?;
    Ok(())
}

fn cmd_project(
    args: ProjectArgs,
    config: &HistoryConfig,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let report = process_project(&args.repo, config)
        .with_context(|| format!("processing {}", args.repo.display()))?;
    let changes = if args.reduce {
        reduce_field_changes(&report.changes)
    } else {
        report.changes.clone()
    };

    if let Some(path) = &args.csv {
        write_file(path, |out| write_csv(&changes, config.text_diff, out))?;
    }
    if let Some(path) = &args.json {
        write_file(path, |out| write_json(&changes, config.text_diff, out))?;
    }
    if let Some(path) = &args.playback {
        write_file(path, |out| write_playback_json(&changes, out))?;
    }

    match format {
        OutputFormat::Json => {
            let out = json!({
                "project": report.project,
                "username": report.username,
                "changes": changes,
                "skipped": report.skipped,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {} ({}): {} changes, {} skipped",
                "✓".green().bold(),
                report.project.display().to_string().bold(),
                report.username.yellow(),
                changes.len(),
                report.skipped.len(),
            );
            for record in &changes {
                println!(
                    "{}  {}  +{}s",
                    short_hash(&record.hash).yellow(),
                    record.date,
                    record.seconds_elapsed
                );
                match &record.features {
                    Some(features) => print_features(features),
                    None => println!("  {}", "first snapshot".dimmed()),
                }
            }
            for skip in &report.skipped {
                println!("{} {}  {}", "skipped".red(), short_hash(&skip.hash), skip.reason);
            }
        }
    }
    Ok(())
}

fn print_counts(label: &str, counts: &FlagCounts) {
    println!(
        "{} ({} records, {} transitions)",
        label.bold(),
        counts.records,
        counts.transitions
    );
    for feature in Feature::ALL {
        println!("  {:<16} {}", feature.as_str().cyan(), counts.get(feature));
    }
}

fn cmd_count(
    args: CountArgs,
    config: &HistoryConfig,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut total = FlagCounts::default();
    let mut per_project = Vec::with_capacity(args.repos.len());
    for repo in &args.repos {
        let report = process_project(repo, config)
            .with_context(|| format!("processing {}", repo.display()))?;
        let changes = if args.reduce {
            reduce_field_changes(&report.changes)
        } else {
            report.changes
        };
        let counts = count_flags(&changes);
        total.merge(&counts);
        per_project.push((repo.display().to_string(), counts));
    }

    match format {
        OutputFormat::Json => {
            let projects: Vec<_> = per_project
                .iter()
                .map(|(name, counts)| json!({ "project": name, "counts": counts }))
                .collect();
            let out = json!({ "projects": projects, "total": total });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for (name, counts) in &per_project {
                print_counts(name, counts);
            }
            print_counts("total", &total);
        }
    }
    Ok(())
}

fn cmd_scan(
    args: ScanArgs,
    config: &HistoryConfig,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let report = discover_projects(&args.folder, config, |form| form.contains(&args.contains));
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for project in &report.projects {
                println!("{}", project.display());
            }
            for problem in &report.problems {
                eprintln!(
                    "{} {}: {}",
                    "problem".red().bold(),
                    problem.path.display(),
                    problem.error
                );
            }
            println!(
                "{} {} matching, {} problems",
                "✓".green().bold(),
                report.projects.len(),
                report.problems.len()
            );
        }
    }
    Ok(())
}
