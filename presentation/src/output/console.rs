//! Console output for analysis, split and normalize results

use colored::Colorize;
use score_application::{
    AnalysisReport, NormalizeOutput, ReplicaFailure, SinglePartReport, SplitReport,
};
use score_domain::{ContentDigest, InstrumentPart};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Formats results for terminal display, or as JSON
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Consensus instrument list with replica statistics
    pub fn format_analysis(report: &AnalysisReport) -> String {
        let consensus = &report.consensus;
        let mut output = String::new();

        output.push_str(&Self::header("Instrument Parts"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Source:".cyan().bold(), report.content));
        if let Some(digest) = report.digest() {
            output.push_str(&format!("{} {}\n", "Digest:".cyan().bold(), digest));
        }
        output.push_str(&format!(
            "{} {} succeeded, {} failed (quorum {})\n",
            "Replicas:".cyan().bold(),
            report.succeeded,
            report.failures.len(),
            consensus.threshold
        ));

        output.push_str(&Self::section_header("Consensus"));
        if consensus.is_empty() {
            output.push_str(&format!("{}\n", "No instrument reached quorum.".yellow()));
        }
        for (i, part) in consensus.instruments.iter().enumerate() {
            output.push_str(&Self::part_line(i + 1, part));
        }

        if !consensus.rejected.is_empty() {
            output.push_str(&format!("\n{}\n", "Below quorum:".yellow().bold()));
            for (key, count) in &consensus.rejected {
                output.push_str(&format!("  * {} ({}x)\n", key, count));
            }
        }

        output.push_str(&Self::failures(&report.failures));
        output.push_str(&Self::footer());
        output
    }

    /// `{"instruments": [...]}` plus run metadata; the result can be fed
    /// back to `split --parts`
    pub fn format_analysis_json(report: &AnalysisReport) -> String {
        Self::pretty(&json!({
            "instruments": report.consensus.instruments,
            "threshold": report.consensus.threshold,
            "contributing": report.consensus.contributing,
            "succeeded": report.succeeded,
            "failures": Self::failures_json(&report.failures),
            "digest": report.digest().map(ContentDigest::as_str),
            "content": report.content.to_string(),
        }))
    }

    pub fn format_single_part(report: &SinglePartReport) -> String {
        let consensus = &report.consensus;
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "Source:".cyan().bold(), report.content));
        let label = match &consensus.voice {
            Some(voice) => format!("{} {}", consensus.name, voice),
            None => consensus.name.clone(),
        };
        output.push_str(&format!("{} {}\n", "Part:".cyan().bold(), label.bold()));
        match consensus.pages {
            Some(pages) => output.push_str(&format!(
                "{} {}-{} ({} pages)\n",
                "Pages:".cyan().bold(),
                consensus.start_page,
                consensus.end_page,
                pages
            )),
            None => output.push_str(&format!(
                "{} {}\n",
                "Pages:".cyan().bold(),
                "unknown".dimmed()
            )),
        }
        output.push_str(&format!(
            "{} {} succeeded, {} failed\n",
            "Replicas:".cyan().bold(),
            report.succeeded,
            report.failures.len()
        ));
        output.push_str(&Self::failures(&report.failures));
        output
    }

    pub fn format_single_part_json(report: &SinglePartReport) -> String {
        Self::pretty(&json!({
            "part": report.consensus,
            "succeeded": report.succeeded,
            "failures": Self::failures_json(&report.failures),
            "content": report.content.to_string(),
        }))
    }

    pub fn format_split(report: &SplitReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Written Parts"));
        if report.outputs.is_empty() {
            output.push_str(&format!("{}\n", "Nothing to write.".yellow()));
        }
        for part in &report.outputs {
            let location = part
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| part.filename.clone());
            output.push_str(&format!(
                "  {} {} {}\n",
                "v".green(),
                location,
                format!("(pp. {}-{})", part.start_page, part.end_page).dimmed()
            ));
        }

        if !report.dropped.is_empty() {
            output.push_str(&format!("\n{}\n", "Skipped entries:".yellow().bold()));
            for dropped in &report.dropped {
                output.push_str(&format!(
                    "  * #{} {}: missing {}\n",
                    dropped.index,
                    dropped.name.as_deref().unwrap_or("unnamed"),
                    dropped.missing
                ));
            }
        }
        output
    }

    pub fn format_split_json(report: &SplitReport) -> String {
        let dropped: Vec<Value> = report
            .dropped
            .iter()
            .map(|d| json!({ "index": d.index, "name": d.name, "missing": d.missing }))
            .collect();
        let parts: Vec<Value> = report
            .outputs
            .iter()
            .map(|part| {
                json!({
                    "index": part.index,
                    "name": part.name,
                    "voice": part.voice,
                    "start_page": part.start_page,
                    "end_page": part.end_page,
                    "path": part.path().map(Path::to_path_buf),
                })
            })
            .collect();
        Self::pretty(&json!({ "parts": parts, "dropped": dropped }))
    }

    pub fn format_normalize(result: &NormalizeOutput) -> String {
        let plan = &result.plan;
        let rotated = if plan.is_noop() {
            "no pages rotated".to_string()
        } else {
            format!("rotated {} page(s)", plan.rotations.len())
        };
        format!(
            "{} {} ({:.0}% landscape, {})\n{}\n",
            "Orientation:".cyan().bold(),
            plan.target.to_string().bold(),
            plan.landscape_percent(),
            rotated,
            result.path.display()
        )
    }

    pub fn format_normalize_json(result: &NormalizeOutput) -> String {
        Self::pretty(&json!({
            "path": result.path,
            "target": result.plan.target,
            "landscape_percent": result.plan.landscape_percent(),
            "rotated_pages": result.plan.rotations,
        }))
    }

    /// `sha256sum`-style line
    pub fn format_hash(digest: &ContentDigest, path: &Path) -> String {
        format!("{}  {}", digest, path.display())
    }

    pub fn format_hash_json(digest: &ContentDigest, path: &Path) -> String {
        Self::pretty(&json!({ "digest": digest, "path": path }))
    }

    /// Config sources as reported by the loader: label, path, whether it exists
    pub fn format_config_sources(sources: &[(String, Option<PathBuf>, bool)]) -> String {
        let mut output = format!("{}\n", "Configuration sources (highest priority first):".bold());
        for (label, path, exists) in sources {
            let location = path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string());
            let status = if *exists {
                "found".green()
            } else {
                "not found".dimmed()
            };
            output.push_str(&format!("  {:<8} {} [{}]\n", label, location, status));
        }
        output
    }

    fn part_line(index: usize, part: &InstrumentPart) -> String {
        format!(
            "  {:>2}. {:<28} {}\n",
            index,
            part.label(),
            format!("pp. {}-{}", part.start_page, part.end_page).dimmed()
        )
    }

    fn failures(failures: &[ReplicaFailure]) -> String {
        if failures.is_empty() {
            return String::new();
        }
        let mut output = format!("\n{}\n", "Failed replicas:".red().bold());
        for failure in failures {
            let replica = failure
                .replica
                .map(|r| format!("#{}", r))
                .unwrap_or_else(|| "?".to_string());
            output.push_str(&format!(
                "  * {} after {} attempt(s): {}\n",
                replica, failure.attempts, failure.error
            ));
        }
        output
    }

    fn failures_json(failures: &[ReplicaFailure]) -> Vec<Value> {
        failures
            .iter()
            .map(|f| json!({ "replica": f.replica, "attempts": f.attempts, "error": f.error }))
            .collect()
    }

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
