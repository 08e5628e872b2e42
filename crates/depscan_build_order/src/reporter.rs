use std::{
    env,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use depscan_core::ImportEdge;
use log::{debug, trace};

use crate::{config::Config, types::BuildReport};

/// Relativize a path to the current working directory for clickable links
fn relativize_to_cwd(path: &Path) -> String {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(_) => {
            debug!("Failed to get current directory");
            return path.display().to_string();
        }
    };

    match make_relative(path, &cwd) {
        Some(rel_path) => {
            let result = rel_path.to_string_lossy().to_string();
            trace!("Relativized '{}' to '{}'", path.display(), result);
            result
        }
        None => path.display().to_string(),
    }
}

/// Create a relative path from `base` to `target`
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    if target_parts.first() != base_parts.first() {
        return None;
    }

    let common = target_parts.iter().zip(&base_parts).take_while(|(t, b)| t == b).count();

    let mut result = PathBuf::new();
    for _ in &base_parts[common..] {
        result.push("..");
    }
    for component in &target_parts[common..] {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

/// Prints the live imports of one file, one edge per line.
pub fn print_imports<W: Write>(writer: &mut W, file: &Path, edges: &[ImportEdge]) -> io::Result<()> {
    writeln!(writer, "{} ({} imports)", relativize_to_cwd(file).blue(), edges.len())?;
    for (idx, edge) in edges.iter().enumerate() {
        let prefix = if idx == edges.len() - 1 { "└──" } else { "├──" };
        match &edge.binding {
            Some(binding) => writeln!(
                writer,
                "{}  {} {} {}",
                prefix.dimmed(),
                binding.bright_white().bold(),
                "from".dimmed(),
                edge.module_path.cyan()
            )?,
            None => writeln!(
                writer,
                "{}  {} {}",
                prefix.dimmed(),
                edge.module_path.cyan(),
                "(side effect)".dimmed()
            )?,
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn print_build_order<W: Write>(
    writer: &mut W,
    report: &BuildReport,
    cfg: &Config,
) -> io::Result<()> {
    debug!("Printing build order for {} entries", report.orders.len());
    let opts = &cfg.build_options;
    let date = opts.date.as_deref().map(|d| format!(" ({d})")).unwrap_or_default();
    writeln!(
        writer,
        "{} {} {}{}\n",
        "●".bright_blue(),
        opts.product.bold(),
        opts.version.cyan(),
        date.dimmed()
    )?;

    for order in &report.orders {
        trace!("Printing order for {}", order.entry.display());
        writeln!(
            writer,
            "{} ({} files)",
            relativize_to_cwd(&order.entry).bright_white().bold(),
            order.files.len().to_string().cyan()
        )?;

        for (idx, file) in order.files.iter().enumerate() {
            let is_last = idx == order.files.len() - 1;
            let prefix = if is_last { "└──" } else { "├──" };
            writeln!(writer, "{}  {:>3}. {}", prefix.dimmed(), idx + 1, relativize_to_cwd(file))?;
        }

        for cycle in &order.cycles {
            writeln!(
                writer,
                "    {} cycle: {} -> {}",
                "⚠".yellow().bold(),
                relativize_to_cwd(&cycle.from),
                relativize_to_cwd(&cycle.to).yellow()
            )?;
        }
        for missing in &order.missing {
            writeln!(
                writer,
                "    {} missing: {}",
                "✗".red().bold(),
                relativize_to_cwd(missing).red()
            )?;
        }
        for excluded in &order.excluded {
            writeln!(
                writer,
                "    {} excluded: {}",
                "-".dimmed(),
                relativize_to_cwd(excluded).dimmed()
            )?;
        }

        writeln!(writer)?;
    }

    print_summary(writer, report)?;

    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, report: &BuildReport) -> io::Result<()> {
    let cycles: usize = report.orders.iter().map(|o| o.cycles.len()).sum();
    let missing: usize = report.orders.iter().map(|o| o.missing.len()).sum();

    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Entries: {}", report.orders.len().to_string().cyan())?;
    writeln!(writer, "  Files scanned: {}", report.files_analyzed.to_string().cyan())?;

    if cycles == 0 && missing == 0 {
        writeln!(writer, "  {} No cycles or missing modules", "✓".green().bold())?;
    } else {
        writeln!(writer, "  Cycles: {}", cycles.to_string().yellow().bold())?;
        writeln!(writer, "  Missing modules: {}", missing.to_string().red().bold())?;
    }

    Ok(())
}

/// Writes `value` as JSON, pretty-printed when `pretty` is set.
pub fn print_json<W: Write, T: serde::Serialize>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
