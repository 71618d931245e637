//! Command-line interface for the Akkadian analyzer.

use akkadian::{AnalysisError, Analyzer, BatchOptions, Gender, OutputFormat};
use clap::{Parser, ValueEnum};
use regex::Regex;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::{fs, time};
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

static REPL_COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:(decline|stem|bound)\s+(\S+)\s+(\S+)\s*$").unwrap()
});

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum CliOutputFormat {
    #[default]
    Str,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Str => OutputFormat::Str,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliGender {
    #[value(alias = "m")]
    Masculine,
    #[value(alias = "f")]
    Feminine,
}

impl From<CliGender> for Gender {
    fn from(cli_gender: CliGender) -> Self {
        match cli_gender {
            CliGender::Masculine => Gender::Masculine,
            CliGender::Feminine => Gender::Feminine,
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to open input file '{path}': {source}")]
    InputFileOpen { path: PathBuf, source: io::Error },

    #[error("Failed to create output file '{path}': {source}")]
    OutputFileCreate { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("REPL error: {0}")]
    Repl(#[from] ReadlineError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Words to analyze (or nouns to decline with --gender).
    #[arg(value_name = "WORD")]
    direct_input: Vec<String>,

    /// Input file path, one word per line (default: stdin).
    #[arg(short, long, value_name = "FILE")]
    input_filename: Option<PathBuf>,

    /// Output file path (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    output_filename: Option<PathBuf>,

    /// Decline every input word as a noun of this gender.
    #[arg(short, long, value_enum)]
    gender: Option<CliGender>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = CliOutputFormat::default())]
    format: CliOutputFormat,

    /// Limit processing to the first n lines of a file.
    #[arg(long)]
    max_lines: Option<usize>,

    /// Decodes Unicode escape notation, e.g., \\u0101 to ā.
    #[arg(short = 'd', long, action = clap::ArgAction::SetTrue)]
    decode_unicode: bool,

    /// Enable parallel file processing.
    #[arg(short = 'p', long = "use-parallel", action = clap::ArgAction::SetTrue)]
    use_parallel: bool,

    /// Run and display a few samples.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    sample: bool,

    /// Suppress progress messages.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    silent: bool,
}

impl Cli {
    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            format: self.format.into(),
            gender: self.gender.map(Gender::from),
            max_lines: self.max_lines,
            decode_unicode: self.decode_unicode,
            silent: self.silent,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();

    if let Err(err) = run() {
        if let CliError::Io(e) = &err
            && e.kind() == io::ErrorKind::BrokenPipe
        {
            return;
        }

        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let analyzer = Analyzer::new();

    if cli.direct_input.is_empty()
        && cli.input_filename.is_none()
        && !cli.sample
        && io::stdin().is_terminal()
    {
        run_repl(&analyzer, &cli.batch_options())?;
        return Ok(());
    }

    if cli.sample
        && cli.direct_input.is_empty()
        && cli.input_filename.is_none()
        && cli.output_filename.is_none()
    {
        show_samples(&analyzer);
        return Ok(());
    }

    let mut writer = open_output(cli.output_filename.as_deref())?;

    if !cli.direct_input.is_empty() {
        process_direct_input(&analyzer, &cli, &mut writer)?;
    }

    if cli.input_filename.is_some() || cli.direct_input.is_empty() {
        process_stream(&analyzer, &cli, &mut writer)?;
    }

    writer.flush()?;

    if cli.sample {
        warn!("the --sample option was ignored because input was provided via other flags");
    }

    Ok(())
}

fn process_direct_input(
    analyzer: &Analyzer,
    cli: &Cli,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let options = cli.batch_options();
    for word in &cli.direct_input {
        writeln!(writer, "{}", analyzer.process_line(word, &options))?;
    }
    Ok(())
}

fn process_stream(analyzer: &Analyzer, cli: &Cli, writer: &mut dyn Write) -> Result<(), CliError> {
    let reader = open_input(cli.input_filename.as_deref())?;
    let options = cli.batch_options();

    if cli.use_parallel {
        analyzer.analyze_file_parallel(reader, writer, &options)?;
    } else {
        analyzer.analyze_file(reader, writer, &options)?;
    }
    Ok(())
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, CliError> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdin().lock()));
    };
    let file = fs::File::open(path).map_err(|source| CliError::InputFileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };
    let file = fs::File::create(path).map_err(|source| CliError::OutputFileCreate {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Runs one REPL command such as `:decline šarratum f`.
fn repl_command(analyzer: &Analyzer, line: &str) -> Result<String, AnalysisError> {
    let Some(caps) = REPL_COMMAND_RE.captures(line) else {
        return Ok("Commands: <word> | :decline <noun> <m|f> | :stem <noun> <m|f> | :bound <noun> <m|f> | :exit".to_string());
    };
    let noun = &caps[2];
    let gender: Gender = caps[3].parse()?;

    match &caps[1] {
        "decline" => {
            let paradigm = analyzer.decline_noun(noun, gender)?;
            Ok(paradigm
                .iter()
                .map(|form| format!("  {form}"))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        "stem" => analyzer.get_stem(noun, gender),
        _ => Ok(analyzer
            .get_bound_form(noun, gender)?
            .unwrap_or_else(|| "(no bound-form rule for this stem)".to_string())),
    }
}

fn history_file() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("akkadian");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("history.txt"))
}

/// Plain lines are analyzed like batch input; `:`-lines are commands.
fn run_repl(analyzer: &Analyzer, options: &BatchOptions) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;
    let history = history_file();

    if let Some(path) = &history {
        match editor.load_history(path) {
            Ok(()) => debug!(path = %path.display(), "loaded REPL history"),
            Err(err) => debug!(path = %path.display(), error = %err, "no REPL history loaded"),
        }
    }

    println!("Enter a word to analyze, or :help for commands. Ctrl-D exits.");

    loop {
        let line = match editor.readline("akk> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                warn!(error = %err, "REPL input failed");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(line)?;

        match line {
            ":exit" | ":quit" => break,
            command if command.starts_with(':') => match repl_command(analyzer, command) {
                Ok(output) => println!("{output}"),
                Err(e) => eprintln!("error: {e}"),
            },
            word => println!("{}", analyzer.process_line(word, options)),
        }
    }

    if let Some(path) = &history
        && let Err(err) = editor.save_history(path)
    {
        warn!(path = %path.display(), error = %err, "could not save REPL history");
    }

    Ok(())
}

fn show_samples(analyzer: &Analyzer) {
    println!("Running sample analyses:");
    println!("---------------------------------------");

    let samples = [
        "iparras",
        "balāṭī",
        "zikarum",
        "tēteneppušā",
        "napištašunu",
        "itâršum",
        "ibnû",
        "kiʾam",
        "īteneppuš",
    ];

    let max_width: usize = 14;
    let mut total_duration_ns: u128 = 0;

    for word in samples {
        let start = time::Instant::now();
        let result = analyzer.analyze(word);
        total_duration_ns += start.elapsed().as_nanos();

        let padding = " ".repeat(max_width.saturating_sub(UnicodeWidthStr::width(word)));
        match result {
            Ok(analysis) => println!(
                "{word}{padding} -> {:<24} {}",
                analysis.stress.join(" "),
                analysis.cv
            ),
            Err(e) => println!("{word}{padding} -> error: {e}"),
        }
    }

    println!("---------------------------------------");
    for (noun, gender) in [("šarrum", Gender::Masculine), ("šarratum", Gender::Feminine)] {
        match analyzer.decline_noun(noun, gender) {
            Ok(paradigm) => {
                let forms: Vec<&str> = paradigm.iter().map(|f| f.form.as_str()).collect();
                println!("{noun} ({gender}): {}", forms.join(", "));
            }
            Err(e) => println!("{noun}: error: {e}"),
        }
    }
    println!("---------------------------------------");

    let avg_duration_us = total_duration_ns as f64 / samples.len() as f64 / 1_000.0;
    println!("Avg. processing time: {avg_duration_us:.1} μs per word");
}
