//! logtail CLI
//!
//! Entry point for the `logtail` command-line tool.

use clap::{Args, Parser, Subcommand};
use logtail::config::{default_config_path, ConfigOrigin, EffectiveConfig, Profile, PROFILE_ENV};
use logtail::{plan_continuation, wire, LogRoot, ScanRequest, TailScanner};
use std::path::PathBuf;
use std::process;
use toml::{Table, Value};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "logtail")]
#[command(about = "Read the tail of large log files, newest lines first", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Built-in defaults to start from (default: $LOGTAIL_PROFILE or production)
    #[arg(long, value_enum, global = true)]
    profile: Option<Profile>,

    /// Config file (default: $LOGTAIL_CONFIG, else /etc/logtail/logtail.toml if present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Directory that log paths are resolved against
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Bytes read per backward chunk
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    /// Hard cap on lines returned by one call
    #[arg(long, global = true)]
    max_lines: Option<usize>,

    /// Read budget per call, in milliseconds
    #[arg(long, global = true)]
    read_timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the last lines of a log file, newest first
    Tail {
        /// Log path, relative to the log root
        logpath: String,

        /// Total lines wanted (default: from config)
        #[arg(long, short = 'n')]
        lines: Option<usize>,

        /// Bytes from the end already consumed by earlier pages
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Maximum lines per page (default: from config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Only return lines matching this regex
        #[arg(long, short = 'e')]
        regex: Option<String>,

        /// Keep following continuation requests until none remain
        #[arg(long)]
        all: bool,

        /// Output each page as a JSON logs response
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and where it came from
    Config {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let profile = match cli.global.profile.map_or_else(Profile::from_env, Ok) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Error in ${}: {}", PROFILE_ENV, e);
            process::exit(2);
        }
    };
    init_tracing(profile);

    let config_path = cli.global.config.clone().or_else(default_config_path);
    let config = match EffectiveConfig::build(profile, config_path.as_deref(), Some(cli_overrides(&cli.global))) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(2);
        }
    };

    match cli.command {
        Commands::Tail {
            logpath,
            lines,
            offset,
            page_size,
            regex,
            all,
            json,
        } => {
            let options = TailOptions {
                lines,
                offset,
                page_size,
                regex,
                all,
                json,
            };
            run_tail(&config, &logpath, options);
        }
        Commands::Config { json } => {
            run_config(&config, json);
        }
    }
}

/// Logs go to stderr; stdout carries only output.
fn init_tracing(profile: Profile) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_log_filter()));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cli_overrides(args: &GlobalArgs) -> Table {
    let mut overrides = Table::new();
    if let Some(ref root) = args.root {
        overrides.insert("log_root".into(), Value::String(root.to_string_lossy().to_string()));
    }

    let mut scan = Table::new();
    if let Some(chunk_size) = args.chunk_size {
        scan.insert("chunk_size".into(), Value::Integer(chunk_size as i64));
    }
    if let Some(max_lines) = args.max_lines {
        scan.insert("max_lines".into(), Value::Integer(max_lines as i64));
    }
    if let Some(timeout) = args.read_timeout_ms {
        scan.insert("read_timeout_ms".into(), Value::Integer(timeout as i64));
    }
    if !scan.is_empty() {
        overrides.insert("scan".into(), Value::Table(scan));
    }
    overrides
}

struct TailOptions {
    lines: Option<usize>,
    offset: u64,
    page_size: Option<usize>,
    regex: Option<String>,
    all: bool,
    json: bool,
}

fn run_tail(config: &EffectiveConfig, logpath: &str, options: TailOptions) {
    let settings = &config.settings;
    let root = LogRoot::new(&settings.log_root);

    let path = match root.resolve(logpath) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let request = ScanRequest::new(path, options.lines.unwrap_or(settings.default_num_lines))
        .map(|r| r.with_start_offset(options.offset))
        .and_then(|r| r.with_page_size(options.page_size.unwrap_or(settings.default_page_size)))
        .and_then(|r| r.with_pattern(options.regex.as_deref()));
    let mut request = match request {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid request: {}", e);
            process::exit(1);
        }
    };

    let scanner = TailScanner::new(settings.scan);
    loop {
        let result = match scanner.scan(&request) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        let next = plan_continuation(&request, &result);

        if options.json {
            let response = wire::logs_response(logpath, &request, result);
            match serde_json::to_string(&response) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing output: {}", e);
                    process::exit(1);
                }
            }
        } else {
            if result.is_partial() {
                eprintln!(
                    "Warning: read budget exhausted after {} lines; results are partial",
                    result.lines_retrieved
                );
            }
            for line in &result.lines {
                println!("{}", line.text);
            }
        }

        match next {
            Some(next) if options.all => request = next,
            Some(next) => {
                if !options.json {
                    eprintln!("More lines available: {}", continuation_hint(logpath, &next));
                    eprintln!("(or rerun with --all to follow every page)");
                }
                break;
            }
            None => break,
        }
    }
}

/// Command line that fetches the page after `next`.
fn continuation_hint(logpath: &str, next: &ScanRequest) -> String {
    let mut hint = format!(
        "logtail tail {} --offset {} -n {} --page-size {}",
        shell_quote(logpath),
        next.start_offset_from_end(),
        next.max_lines(),
        next.page_size_cap()
    );
    if let Some(pattern) = next.filter().as_str() {
        hint.push_str(" --regex ");
        hint.push_str(&shell_quote(pattern));
    }
    hint
}

/// Single-quote `value` for a POSIX shell.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn run_config(config: &EffectiveConfig, json: bool) {
    if json {
        match config.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let settings = &config.settings;
    println!("Profile: {}", config.profile);
    println!();
    println!("  Log root: {}", settings.log_root.display());
    println!("  Default lines: {}", settings.default_num_lines);
    println!("  Default page size: {}", settings.default_page_size);
    println!("  Chunk size: {} bytes", settings.scan.chunk_size);
    println!("  Max lines per call: {}", settings.scan.max_lines);
    println!("  Read timeout: {} ms", settings.scan.read_timeout_ms);
    println!();
    println!("Sources:");
    for source in &config.sources {
        match source.origin {
            ConfigOrigin::Builtin => println!("  builtin ({})", config.profile),
            ConfigOrigin::File => println!(
                "  file {} (sha256 {})",
                source.path.as_deref().unwrap_or("?"),
                source.digest.as_deref().unwrap_or("?")
            ),
            ConfigOrigin::Cli => println!("  command line"),
        }
    }
}
