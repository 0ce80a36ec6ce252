use clap::{Args, Parser, Subcommand};
use lineindex_core::analysis::StopwordFilter;
use lineindex_core::batch::{read_inputs, Job, JobStats, LocalRunner};
use lineindex_core::config::{self, IndexConfig, StopwordSource};
use lineindex_core::index::InvertedIndexJob;
use lineindex_core::wordcount::{suggest_stopwords, WordCountJob};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lineindex",
    version,
    about = "Build word-level inverted indexes over line-numbered text"
)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    /// Print the run's Prometheus counters to stderr when it finishes
    #[arg(long, global = true, default_value_t = false)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an inverted index: one `<term>\t<file:line:pos,...>` line per term
    Index(JobArgs),
    /// Count terms over plain text: one `<term>\t<count>` line per term
    Wordcount(JobArgs),
    /// Read word count output and print the terms that look like stopwords
    SuggestStopwords {
        /// Word count output file
        counts: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct JobArgs {
    /// Input files or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stopword file, one word per line. Overrides LINEINDEX_STOPWORDS.
    #[arg(long, conflicts_with = "embedded_stopwords")]
    stopwords: Option<PathBuf>,

    /// Use the built-in English stopword list
    #[arg(long, default_value_t = false)]
    embedded_stopwords: bool,

    /// Fail if the stopword file does not exist
    #[arg(long, default_value_t = false)]
    strict_stopwords: bool,

    /// Worker threads (0 = one per core)
    #[arg(short, long)]
    workers: Option<usize>,

    /// JSON configuration file; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print run statistics as JSON to stderr
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let prometheus = if cli.metrics {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("Error: failed to install metrics recorder: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    if let Err(e) = run(cli.command, prometheus.as_ref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::from_default_env()
        .add_directive(
            "lineindex_core=info"
                .parse()
                .expect("valid directive literal"),
        )
        .add_directive("lineindex=info".parse().expect("valid directive literal"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(
    command: Command,
    prometheus: Option<&PrometheusHandle>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Index(args) => {
            let config = resolve_config(&args, std::env::var(config::STOPWORDS_ENV_VAR).ok())?;
            let job = InvertedIndexJob::from_filter(&StopwordFilter::from_config(&config))?;
            run_job(&job, &args, &config, prometheus)
        }
        Command::Wordcount(args) => {
            let config = resolve_config(&args, std::env::var(config::STOPWORDS_ENV_VAR).ok())?;
            let job = WordCountJob::from_filter(&StopwordFilter::from_config(&config))?;
            run_job(&job, &args, &config, prometheus)
        }
        Command::SuggestStopwords { counts, output } => {
            let reader = BufReader::new(File::open(&counts).map_err(|e| {
                format!("cannot open word counts {}: {}", counts.display(), e)
            })?);
            let suggested = suggest_stopwords(reader)?;
            let mut sink = open_sink(output.as_deref())?;
            for word in &suggested {
                writeln!(sink, "{word}")?;
            }
            sink.flush()?;
            Ok(())
        }
    }
}

fn run_job<J: Job>(
    job: &J,
    args: &JobArgs,
    config: &IndexConfig,
    prometheus: Option<&PrometheusHandle>,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = read_inputs(&args.inputs)?;
    tracing::info!(
        job = job.name(),
        inputs = inputs.len(),
        workers = config.workers,
        "Starting job"
    );

    let mut sink = open_sink(args.output.as_deref())?;
    let stats = LocalRunner::new(config.workers).run(job, &inputs, &mut sink)?;
    report(&stats, args.stats, prometheus)?;
    Ok(())
}

/// Layer the config file, the environment and the flags, in that order.
fn resolve_config(
    args: &JobArgs,
    env_stopwords: Option<String>,
) -> Result<IndexConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
            IndexConfig::from_json(&json)
                .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
        }
        None => IndexConfig::default(),
    };

    if config.stopwords == StopwordSource::None {
        if let Some(path) = env_stopwords.filter(|p| !p.is_empty()) {
            config.stopwords = StopwordSource::File(PathBuf::from(path));
        }
    }
    if let Some(path) = &args.stopwords {
        config.stopwords = StopwordSource::File(path.clone());
    } else if args.embedded_stopwords {
        config.stopwords = StopwordSource::Embedded;
    }
    if args.strict_stopwords {
        config.strict_stopwords = true;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    Ok(config)
}

fn open_sink(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(sink)
}

fn report(
    stats: &JobStats,
    print_stats: bool,
    prometheus: Option<&PrometheusHandle>,
) -> Result<(), Box<dyn std::error::Error>> {
    if stats.rejected() > 0 {
        tracing::warn!(
            "{} of {} records rejected ({} malformed, {} undecodable)",
            stats.rejected(),
            stats.records_read,
            stats.rejected_malformed,
            stats.rejected_encoding
        );
    }
    if print_stats {
        eprintln!("{}", serde_json::to_string_pretty(stats)?);
    }
    if let Some(handle) = prometheus {
        eprint!("{}", handle.render());
    }
    Ok(())
}
