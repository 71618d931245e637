//! Grammatical features and the nominal ending table.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::AnalysisError;
use crate::utils::{dequote_string, slot_value_in_double_colon_del_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Singular,
    Dual,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nominative,
    Accusative,
    Genitive,
    /// Genitive-accusative of the dual and plural.
    Oblique,
}

/// Every case/number slot of a paradigm, in citation order.
pub const SLOTS: [(Number, Case); 7] = [
    (Number::Singular, Case::Nominative),
    (Number::Singular, Case::Accusative),
    (Number::Singular, Case::Genitive),
    (Number::Dual, Case::Nominative),
    (Number::Dual, Case::Oblique),
    (Number::Plural, Case::Nominative),
    (Number::Plural, Case::Oblique),
];

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Masculine => "masculine",
            Gender::Feminine => "feminine",
        }
    }
}

impl Number {
    pub fn as_str(self) -> &'static str {
        match self {
            Number::Singular => "singular",
            Number::Dual => "dual",
            Number::Plural => "plural",
        }
    }
}

impl Case {
    pub fn as_str(self) -> &'static str {
        match self {
            Case::Nominative => "nominative",
            Case::Accusative => "accusative",
            Case::Genitive => "genitive",
            Case::Oblique => "oblique",
        }
    }
}

fn unknown(kind: &'static str, value: &str) -> AnalysisError {
    AnalysisError::UnknownFeature {
        kind,
        value: value.to_string(),
    }
}

impl FromStr for Gender {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "masc" | "masculine" => Ok(Gender::Masculine),
            "f" | "fem" | "feminine" => Ok(Gender::Feminine),
            _ => Err(unknown("gender", s)),
        }
    }
}

impl FromStr for Number {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sg" | "singular" => Ok(Number::Singular),
            "du" | "dual" => Ok(Number::Dual),
            "pl" | "plural" => Ok(Number::Plural),
            _ => Err(unknown("number", s)),
        }
    }
}

impl FromStr for Case {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nom" | "nominative" => Ok(Case::Nominative),
            "acc" | "accusative" => Ok(Case::Accusative),
            "gen" | "genitive" => Ok(Case::Genitive),
            "obl" | "oblique" => Ok(Case::Oblique),
            _ => Err(unknown("case", s)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the ending table: the endings of a single gender/number/case slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EndingRule {
    pub gender: Gender,
    pub number: Number,
    pub case: Case,
    pub endings: Vec<String>,
}

impl EndingRule {
    pub fn from_line(line: &str) -> Option<Self> {
        let gender = slot_value_in_double_colon_del_list(line, "gender")?.parse().ok()?;
        let number = slot_value_in_double_colon_del_list(line, "number")?.parse().ok()?;
        let case = slot_value_in_double_colon_del_list(line, "case")?.parse().ok()?;

        let endings: Vec<String> = slot_value_in_double_colon_del_list(line, "endings")?
            .split([',', ';'])
            .map(|part| dequote_string(part).to_string())
            .filter(|part| !part.is_empty())
            .collect();

        if endings.is_empty() {
            return None;
        }

        Some(EndingRule {
            gender,
            number,
            case,
            endings,
        })
    }
}

/// Endings keyed by gender, number and case. Immutable once loaded.
#[derive(Debug, Default, Clone)]
pub struct EndingTable {
    slots: HashMap<(Gender, Number, Case), Vec<String>>,
}

impl EndingTable {
    pub(crate) fn insert(&mut self, rule: EndingRule) {
        self.slots
            .insert((rule.gender, rule.number, rule.case), rule.endings);
    }

    /// All endings of a slot; feminine plurals have one per theme vowel.
    pub fn get(&self, gender: Gender, number: Number, case: Case) -> &[String] {
        self.slots
            .get(&(gender, number, case))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every ending of `number` across the paradigm's cases.
    pub fn endings(&self, gender: Gender, number: Number) -> impl Iterator<Item = &str> {
        SLOTS
            .iter()
            .filter(move |(n, _)| *n == number)
            .flat_map(move |&(n, c)| self.get(gender, n, c))
            .map(String::as_str)
    }

    /// Slots without any ending.
    pub fn missing_slots(&self) -> Vec<(Gender, Number, Case)> {
        [Gender::Masculine, Gender::Feminine]
            .into_iter()
            .flat_map(|g| SLOTS.iter().map(move |&(n, c)| (g, n, c)))
            .filter(|key| !self.slots.contains_key(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rule_lines() {
        let rule =
            EndingRule::from_line("::gender f ::number plural ::case oblique ::endings ātim, ētim,ītim")
                .unwrap();
        assert_eq!(rule.gender, Gender::Feminine);
        assert_eq!(rule.number, Number::Plural);
        assert_eq!(rule.case, Case::Oblique);
        assert_eq!(rule.endings, ["ātim", "ētim", "ītim"]);
    }

    #[test]
    fn rejects_incomplete_lines() {
        assert!(EndingRule::from_line("::gender m ::number singular ::endings um").is_none());
        assert!(EndingRule::from_line("::gender n ::number singular ::case nominative ::endings um").is_none());
        assert!(EndingRule::from_line("::gender m ::number singular ::case nominative ::endings").is_none());
    }

    #[test]
    fn parses_feature_abbreviations() {
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Masculine);
        assert_eq!("Feminine".parse::<Gender>().unwrap(), Gender::Feminine);
        assert_eq!("pl".parse::<Number>().unwrap(), Number::Plural);
        assert_eq!("obl".parse::<Case>().unwrap(), Case::Oblique);
        assert!(matches!(
            "neuter".parse::<Gender>(),
            Err(AnalysisError::UnknownFeature { kind: "gender", .. })
        ));
    }

    #[test]
    fn endings_by_number() {
        let mut table = EndingTable::default();
        for line in [
            "::gender m ::number dual ::case nominative ::endings ān",
            "::gender m ::number dual ::case oblique ::endings īn",
            "::gender m ::number plural ::case oblique ::endings ī",
        ] {
            table.insert(EndingRule::from_line(line).unwrap());
        }
        let dual: Vec<&str> = table.endings(Gender::Masculine, Number::Dual).collect();
        assert_eq!(dual, ["ān", "īn"]);
        assert!(table.get(Gender::Feminine, Number::Dual, Case::Oblique).is_empty());
        assert_eq!(table.missing_slots().len(), 11);
    }
}
