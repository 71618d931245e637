//! Phonological and morphological analysis of transliterated Akkadian.
//!
//! The `Analyzer` struct is the main entry point. It syllabifies words,
//! classifies syllable weight, assigns stress, extracts consonant/vowel
//! patterns, and strips and regenerates noun endings.
//!
//! ```
//! # use akkadian::Analyzer;
//! let analyzer = Analyzer::new();
//! let stress = analyzer.render_stress("iparras").unwrap();
//! assert_eq!(stress, ["i", "[par]", "ras"]);
//! ```

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::AnalyzerInner;
use crate::utils::{LossyLines, decode_unicode_escapes};

pub mod alphabet;
mod core;
pub mod cv_pattern;
pub mod declension;
pub mod ending;
pub mod stress;
pub mod syllable;
mod utils;

pub use crate::alphabet::{CharClass, Letter, Word};
pub use crate::cv_pattern::{CvEntry, SegmentClass};
pub use crate::declension::{NounForm, Paradigm};
pub use crate::ending::{Case, EndingTable, Gender, Number};
pub use crate::stress::{StressedSyllable, WeightedSyllable};
pub use crate::syllable::{Syllable, Weight};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("empty word")]
    EmptyWord,

    #[error("unknown character '{0}'")]
    UnknownCharacter(char),

    #[error("malformed word '{word}': no syllable can end at position {position}")]
    MalformedWord { word: String, position: usize },

    #[error("unknown {gender} noun: '{noun}'")]
    UnknownEndingPattern { noun: String, gender: Gender },

    #[error("pattern index {index} has no subscript form")]
    SubscriptOutOfRange { index: usize },

    #[error("unknown {kind}: '{value}'")]
    UnknownFeature { kind: &'static str, value: String },

    #[error("Failed to serialize the result to JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Internal logic error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-separated plain text.
    #[default]
    Str,
    /// One JSON object per line.
    Json,
}

/// Settings for `analyze_file` and `analyze_file_parallel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub format: OutputFormat,
    /// Decline every plain line as a noun of this gender instead of analyzing it.
    pub gender: Option<Gender>,
    pub max_lines: Option<usize>,
    /// Decode `\uXXXX` escapes before analysis.
    pub decode_unicode: bool,
    pub silent: bool,
}

impl BatchOptions {
    fn line_limit(&self) -> usize {
        self.max_lines.unwrap_or(usize::MAX)
    }
}

/// Everything the analyzer derives from a single word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordAnalysis {
    pub word: String,
    pub syllables: Vec<StressedSyllable>,
    pub stress: Vec<String>,
    pub cv_pattern: Vec<CvEntry>,
    pub cv: String,
}

impl fmt::Display for WordAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weights: Vec<&str> = self.syllables.iter().map(|s| s.weight.code()).collect();
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.word,
            self.stress.join(" "),
            weights.join(" "),
            self.cv
        )
    }
}

const GENDER_DIRECTIVE: &str = "::gender ";

static GLOBAL_ANALYZER_INNER: LazyLock<Arc<AnalyzerInner>> =
    LazyLock::new(|| Arc::new(AnalyzerInner::new()));

/// The main struct for analysis.
///
/// Cloning is cheap: all analyzers share one set of rule tables.
#[derive(Debug, Clone)]
pub struct Analyzer {
    inner: Arc<AnalyzerInner>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            inner: Arc::clone(&GLOBAL_ANALYZER_INNER),
        }
    }

    pub fn endings(&self) -> &EndingTable {
        &self.inner.endings
    }

    /// Splits a word into syllables.
    ///
    /// # Example
    /// ```
    /// # use akkadian::Analyzer;
    /// let syllables = Analyzer::new().syllabify("balāṭī").unwrap();
    /// let texts: Vec<String> = syllables.iter().map(|s| s.text()).collect();
    /// assert_eq!(texts, ["ba", "lā", "ṭī"]);
    /// ```
    pub fn syllabify(&self, word: &str) -> Result<Vec<Syllable>, AnalysisError> {
        syllable::syllabify(&Word::parse(word)?)
    }

    pub fn weigh(&self, word: &str) -> Result<Vec<WeightedSyllable>, AnalysisError> {
        Ok(stress::weigh(&self.syllabify(word)?))
    }

    pub fn stress(&self, word: &str) -> Result<Vec<StressedSyllable>, AnalysisError> {
        Ok(stress::assign_stress(&self.weigh(word)?))
    }

    /// Syllables with the stressed one bracketed, e.g. `["[zi]", "ka", "rum"]`.
    pub fn render_stress(&self, word: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(stress::render_stress(&self.stress(word)?))
    }

    pub fn cv_pattern(&self, word: &str) -> Result<Vec<CvEntry>, AnalysisError> {
        Ok(cv_pattern::cv_pattern(Word::parse(word)?.letters()))
    }

    /// Renders the CV pattern with subscripts, e.g. `V₁C₁V₂C₂C₂V₂C₃`.
    pub fn render_cv_pattern(&self, word: &str) -> Result<String, AnalysisError> {
        cv_pattern::render_cv_pattern(&self.cv_pattern(word)?)
    }

    /// Strips the case/number ending from a noun.
    ///
    /// # Example
    /// ```
    /// # use akkadian::{Analyzer, Gender};
    /// let analyzer = Analyzer::new();
    /// assert_eq!(analyzer.get_stem("ilum", Gender::Masculine).unwrap(), "il");
    /// assert_eq!(analyzer.get_stem("ilātum", Gender::Feminine).unwrap(), "ilt");
    /// ```
    pub fn get_stem(&self, noun: &str, gender: Gender) -> Result<String, AnalysisError> {
        declension::get_stem(self.endings(), &Word::parse(noun)?, gender)
    }

    pub fn decline_noun(&self, noun: &str, gender: Gender) -> Result<Paradigm, AnalysisError> {
        declension::decline_noun(self.endings(), &Word::parse(noun)?, gender)
    }

    /// Bound form of a noun; `Ok(None)` when no rule covers the stem.
    pub fn get_bound_form(
        &self,
        noun: &str,
        gender: Gender,
    ) -> Result<Option<String>, AnalysisError> {
        declension::get_bound_form(self.endings(), &Word::parse(noun)?, gender)
    }

    pub fn analyze(&self, word: &str) -> Result<WordAnalysis, AnalysisError> {
        let word = Word::parse(word)?;
        let syllables = stress::assign_stress(&stress::weigh(&syllable::syllabify(&word)?));
        let pattern = cv_pattern::cv_pattern(word.letters());

        Ok(WordAnalysis {
            word: word.to_string(),
            stress: stress::render_stress(&syllables),
            cv: cv_pattern::render_cv_pattern(&pattern)?,
            syllables,
            cv_pattern: pattern,
        })
    }

    /// Analyzes one input line, or declines it when a gender applies.
    ///
    /// Lines starting with `::gender <m|f>` decline the rest of the line.
    /// Errors are reported in the output line rather than returned.
    pub fn process_line(&self, line: &str, options: &BatchOptions) -> String {
        let decoded;
        let line = if options.decode_unicode {
            decoded = decode_unicode_escapes(line);
            decoded.as_str()
        } else {
            line
        };

        if line.trim().is_empty() {
            return String::new();
        }

        let result = match line.strip_prefix(GENDER_DIRECTIVE) {
            Some(rest) => {
                let mut parts = rest.trim().splitn(2, char::is_whitespace);
                let gender = parts.next().unwrap_or("");
                let noun = parts.next().unwrap_or("").trim();
                gender
                    .parse()
                    .and_then(|gender| self.format_paradigm(noun, gender, options.format))
                    .map_err(|e| (noun, e))
            }
            None => {
                let word = line.trim();
                let output = match options.gender {
                    Some(gender) => self.format_paradigm(word, gender, options.format),
                    None => self.format_analysis(word, options.format),
                };
                output.map_err(|e| (word, e))
            }
        };

        result.unwrap_or_else(|(word, err)| {
            warn!(word, error = %err, "skipping word");
            format_error(word, &err, options.format)
        })
    }

    fn format_analysis(&self, word: &str, format: OutputFormat) -> Result<String, AnalysisError> {
        let analysis = self.analyze(word)?;
        match format {
            OutputFormat::Str => Ok(analysis.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(&analysis)?),
        }
    }

    fn format_paradigm(
        &self,
        noun: &str,
        gender: Gender,
        format: OutputFormat,
    ) -> Result<String, AnalysisError> {
        let paradigm = self.decline_noun(noun, gender)?;
        match format {
            OutputFormat::Str => Ok(format!("{noun}\t{paradigm}")),
            OutputFormat::Json => Ok(serde_json::to_string(&paradigm)?),
        }
    }

    /// Analyzes a stream line by line and writes one output line per input line.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a bad byte only
    /// affects the word it occurs in.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading or writing fails; words that cannot
    /// be analyzed produce an `error:` line instead.
    pub fn analyze_file<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
        options: &BatchOptions,
    ) -> Result<(), AnalysisError> {
        let mut lines = LossyLines::new(reader);

        for line in lines.by_ref().take(options.line_limit()) {
            writeln!(writer, "{}", self.process_line(&line?, options))?;
        }

        report_batch(&lines, options);
        writer.flush()?;
        Ok(())
    }

    /// Like `analyze_file`, but processes lines on all cores.
    ///
    /// Reads the whole input into memory first. Output order is preserved.
    pub fn analyze_file_parallel<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
        options: &BatchOptions,
    ) -> Result<(), AnalysisError> {
        let mut lines = LossyLines::new(reader);
        let batch: Vec<String> = lines
            .by_ref()
            .take(options.line_limit())
            .collect::<Result<_, _>>()?;

        let results: Vec<String> = batch
            .par_iter()
            .map(|line| self.process_line(line, options))
            .collect();

        for output in results {
            writeln!(writer, "{output}")?;
        }

        report_batch(&lines, options);
        writer.flush()?;
        Ok(())
    }
}

fn report_batch<R: BufRead>(lines: &LossyLines<R>, options: &BatchOptions) {
    if !options.silent {
        info!(lines = lines.line_number(), "analysis finished");
    }
    if lines.non_utf8_lines() > 0 {
        warn!(lines = lines.non_utf8_lines(), "lines with non-UTF-8 characters");
    }
}

fn format_error(word: &str, err: &AnalysisError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Str => format!("{word}\terror: {err}"),
        OutputFormat::Json => serde_json::json!({ "word": word, "error": err.to_string() }).to_string(),
    }
}
