use tracing::{debug, warn};

use crate::ending::{EndingRule, EndingTable};

/// Process-wide rule data, loaded once from the embedded data files.
#[derive(Debug, Default)]
pub(crate) struct AnalyzerInner {
    pub(crate) endings: EndingTable,
}

impl AnalyzerInner {
    pub(crate) fn new() -> Self {
        let mut analyzer = Self::default();
        analyzer.load_resource_files();
        analyzer
    }

    fn load_resource_files(&mut self) {
        self.load_ending_file(include_str!("../data/noun-endings.txt"), "noun-endings");
    }

    /// Loads ending rules; later lines for the same slot overwrite earlier ones.
    fn load_ending_file(&mut self, file: &'static str, provenance: &str) {
        let mut n_rules = 0;

        for (line_number, line) in file.lines().enumerate() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }

            match EndingRule::from_line(line) {
                Some(rule) => {
                    self.endings.insert(rule);
                    n_rules += 1;
                }
                None => warn!(
                    file = provenance,
                    line = line_number + 1,
                    "skipping malformed ending rule"
                ),
            }
        }

        for (gender, number, case) in self.endings.missing_slots() {
            warn!(file = provenance, %gender, %number, %case, "no ending for slot");
        }
        debug!(file = provenance, rules = n_rules, "loaded ending rules");
    }
}
