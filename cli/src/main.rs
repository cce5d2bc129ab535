//! CLI entrypoint for score-quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use score_application::{
    AnalyseScoreUseCase, AnalysisInput, AnalysisSource, ContentLoader, ContentSource,
    ContentStore, EventLog, NoEventLog, NoProgress, NormalizeInput, NormalizeOrientationUseCase,
    PdfEngine, ProgressNotifier, SourceDocument, SplitInput, SplitPartsUseCase, SplitTarget,
};
use score_domain::{ContentDigest, OutputFormat, parse_analysis_response};
use score_infrastructure::{
    ConfigLoader, DigestCache, FileConfig, FsContentLoader, JsonlEventLog, LopdfEngine,
    OpenAiGateway,
};
use score_presentation::{
    AnalyseArgs, Cli, Command, ConsoleFormatter, HashArgs, NormalizeArgs, ProgressReporter,
    SplitArgs, is_url,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli)?;

    info!("Starting score-quorum");

    if let Command::Config = cli.command {
        print!(
            "{}",
            ConsoleFormatter::format_config_sources(&ConfigLoader::config_sources())
        );
        if let Some(path) = &cli.config {
            println!("  Explicit {}", path.display());
        }
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            error!("Invalid configuration: {}", issue);
        }
        bail!("Configuration has {} problem(s)", issues.len());
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let app = App::new(config, cli.json, cli.quiet);

    match &cli.command {
        Command::Analyse(args) => app.analyse(args).await,
        Command::Split(args) => app.split(args).await,
        Command::Normalize(args) => app.normalize(args).await,
        Command::Hash(args) => app.hash(args).await,
        Command::Config => Ok(()),
    }
}

/// Console logging from `-v`/`-q` (or `RUST_LOG`), plus an optional log file
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else {
        match cli.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        }
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file {} does not name a file", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Adapters shared by every command
struct App {
    config: FileConfig,
    json: bool,
    quiet: bool,
    loader: Arc<dyn ContentLoader>,
    store: Arc<dyn ContentStore>,
    engine: Arc<dyn PdfEngine>,
    events: Arc<dyn EventLog>,
}

impl App {
    fn new(config: FileConfig, json_flag: bool, quiet: bool) -> Self {
        let json = json_flag || config.output.format == Some(OutputFormat::Json);

        let events: Arc<dyn EventLog> = match config.logging.event_log.as_ref() {
            Some(path) => match JsonlEventLog::new(path) {
                Some(log) => {
                    info!("Recording pipeline events to {}", log.path().display());
                    Arc::new(log)
                }
                None => Arc::new(NoEventLog),
            },
            None => Arc::new(NoEventLog),
        };

        let cache_dir = config.cache.resolve_dir();
        info!("Cache directory: {}", cache_dir.display());

        Self {
            json,
            quiet,
            loader: Arc::new(FsContentLoader::new()),
            store: Arc::new(DigestCache::new(cache_dir)),
            engine: Arc::new(LopdfEngine::new()),
            events,
            config,
        }
    }

    fn max_content_bytes(&self) -> u64 {
        self.config.analysis.max_content_bytes()
    }

    fn progress(&self) -> Box<dyn ProgressNotifier> {
        if self.quiet {
            Box::new(NoProgress)
        } else {
            Box::new(ProgressReporter::new())
        }
    }

    fn analyser(&self) -> Result<AnalyseScoreUseCase<OpenAiGateway>> {
        let gateway = OpenAiGateway::from_config(&self.config.oracle)
            .context("Failed to set up the oracle client")?;

        Ok(AnalyseScoreUseCase::new(
            Arc::new(gateway),
            Arc::clone(&self.loader),
            Arc::clone(&self.store),
            Arc::clone(&self.engine),
        )
        .with_config(self.config.to_analysis_config())
        .with_events(Arc::clone(&self.events)))
    }

    async fn analyse(&self, args: &AnalyseArgs) -> Result<()> {
        let content = args.source.as_deref().map(content_source);
        let mut input =
            AnalysisInput::new(AnalysisSource::from_parts(content, args.file_url.clone())?);
        if let Some(replicates) = args.replicates {
            input = input.with_replicates(replicates);
        }

        let use_case = self.analyser()?;
        let progress = self.progress();

        if args.single_part {
            let report = use_case
                .execute_single_part_with_progress(input, progress.as_ref())
                .await?;
            if self.json {
                println!("{}", ConsoleFormatter::format_single_part_json(&report));
            } else {
                print!("{}", ConsoleFormatter::format_single_part(&report));
            }
        } else {
            let report = use_case
                .execute_with_progress(input, progress.as_ref())
                .await?;
            if self.json {
                println!("{}", ConsoleFormatter::format_analysis_json(&report));
            } else {
                print!("{}", ConsoleFormatter::format_analysis(&report));
            }
        }

        Ok(())
    }

    async fn split(&self, args: &SplitArgs) -> Result<()> {
        let source = content_source(&args.source);

        let input = match &args.parts {
            Some(parts_path) => {
                let text = tokio::fs::read_to_string(parts_path)
                    .await
                    .with_context(|| format!("Failed to read {}", parts_path.display()))?;
                let parts = parse_analysis_response(&text)
                    .with_context(|| format!("Invalid parts file {}", parts_path.display()))?;
                let document = self.loader.load(&source, self.max_content_bytes()).await?;
                let target = split_target(args.output.as_ref(), &document);
                SplitInput::new(document, parts.instruments, target)
            }
            None => {
                let mut input = AnalysisInput::new(AnalysisSource::Content(source));
                if let Some(replicates) = args.replicates {
                    input = input.with_replicates(replicates);
                }
                let progress = self.progress();
                let report = self
                    .analyser()?
                    .execute_with_progress(input, progress.as_ref())
                    .await?;
                let target = match report.document.as_ref() {
                    Some(document) => split_target(args.output.as_ref(), document),
                    None => bail!("Splitting needs a local copy of the document"),
                };
                SplitInput::from_report(report, target)?
            }
        };

        let use_case = SplitPartsUseCase::new(Arc::clone(&self.engine), Arc::clone(&self.store))
            .with_events(Arc::clone(&self.events));
        let report = tokio::task::spawn_blocking(move || use_case.execute(&input)).await??;

        if self.json {
            println!("{}", ConsoleFormatter::format_split_json(&report));
        } else {
            print!("{}", ConsoleFormatter::format_split(&report));
        }
        Ok(())
    }

    async fn normalize(&self, args: &NormalizeArgs) -> Result<()> {
        let threshold = args
            .threshold
            .unwrap_or(self.config.orientation.threshold_percent);
        if !(0.0..=100.0).contains(&threshold) {
            bail!("--threshold must be between 0 and 100, got {}", threshold);
        }

        let document = self
            .loader
            .load(
                &ContentSource::Path(args.source.clone()),
                self.max_content_bytes(),
            )
            .await?;

        let mut input = NormalizeInput::new(document).with_threshold(threshold);
        if let Some(output) = &args.output {
            input = input.with_output(output);
        }

        let use_case =
            NormalizeOrientationUseCase::new(Arc::clone(&self.engine), Arc::clone(&self.store))
                .with_events(Arc::clone(&self.events));
        let result = tokio::task::spawn_blocking(move || use_case.execute(&input)).await??;

        if self.json {
            println!("{}", ConsoleFormatter::format_normalize_json(&result));
        } else {
            print!("{}", ConsoleFormatter::format_normalize(&result));
        }
        Ok(())
    }

    async fn hash(&self, args: &HashArgs) -> Result<()> {
        let bytes = tokio::fs::read(&args.file)
            .await
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let digest = ContentDigest::of(&bytes);

        if self.json {
            println!("{}", ConsoleFormatter::format_hash_json(&digest, &args.file));
        } else {
            println!("{}", ConsoleFormatter::format_hash(&digest, &args.file));
        }
        Ok(())
    }
}

fn content_source(source: &str) -> ContentSource {
    if is_url(source) {
        ContentSource::Url(source.to_string())
    } else {
        ContentSource::Path(PathBuf::from(source))
    }
}

/// `-o DIR`, else `{stem}_parts` beside the local file (or in the working
/// directory for downloads)
fn split_target(output: Option<&PathBuf>, document: &SourceDocument) -> SplitTarget {
    match (output, &document.origin) {
        (Some(dir), _) => SplitTarget::Directory(dir.clone()),
        (None, Some(origin)) => SplitTarget::beside(origin),
        (None, None) => SplitTarget::beside(Path::new(&document.name)),
    }
}
