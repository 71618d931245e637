//! Stem extraction and noun declension.

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::AnalysisError;
use crate::alphabet::{Letter, Word, letters_of, letters_to_string};
use crate::cv_pattern::{SegmentClass, cv_pattern};
use crate::ending::{Case, EndingTable, Gender, Number, SLOTS};
use crate::syllable::syllabify;

/// Stems whose bound form adds `-i` (`abum` > `abi`).
const BOUND_FORM_I_STEMS: [&str; 2] = ["ab", "aḫ"];

const DEFAULT_THEME_VOWEL: char = 'ā';

fn strip_any<'a, 'e>(noun: &'a str, mut endings: impl Iterator<Item = &'e str>) -> Option<&'a str> {
    endings.find_map(|ending| noun.strip_suffix(ending))
}

/// Removes the case/number ending of `noun`.
///
/// Feminine nouns try the plural endings, then the `t`-initial singular and
/// dual endings (both leave the stem ending in `t`), then the masculine
/// singular and dual endings for feminines without the `t` marker.
/// Masculine nouns try the singular and dual endings, then the plural ones.
/// Mimation is left in place.
pub fn get_stem(table: &EndingTable, noun: &Word, gender: Gender) -> Result<String, AnalysisError> {
    use Gender::{Feminine, Masculine};
    use Number::{Dual, Plural, Singular};

    let text = noun.as_str();
    let masculine_singular_dual =
        || table.endings(Masculine, Singular).chain(table.endings(Masculine, Dual));

    let stem = match gender {
        Feminine => strip_any(text, table.endings(Feminine, Plural))
            .or_else(|| {
                strip_any(
                    text,
                    table.endings(Feminine, Singular).chain(table.endings(Feminine, Dual)),
                )
            })
            .map(|stem| format!("{stem}{}", Letter::T))
            .or_else(|| strip_any(text, masculine_singular_dual()).map(str::to_string)),
        Masculine => strip_any(text, masculine_singular_dual())
            .or_else(|| strip_any(text, table.endings(Masculine, Plural)))
            .map(str::to_string),
    };

    match stem {
        Some(stem) if !stem.is_empty() => Ok(stem),
        _ => {
            warn!(noun = %noun, %gender, "unknown noun ending");
            Err(AnalysisError::UnknownEndingPattern {
                noun: noun.to_string(),
                gender,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NounForm {
    pub form: String,
    pub case: Case,
    pub number: Number,
}

impl fmt::Display for NounForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.form, self.case, self.number)
    }
}

/// The seven case/number forms of a noun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paradigm {
    pub stem: String,
    pub gender: Gender,
    pub forms: Vec<NounForm>,
}

impl Paradigm {
    pub fn get(&self, number: Number, case: Case) -> Option<&NounForm> {
        self.forms
            .iter()
            .find(|f| f.number == number && f.case == case)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NounForm> {
        self.forms.iter()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl<'a> IntoIterator for &'a Paradigm {
    type Item = &'a NounForm;
    type IntoIter = std::slice::Iter<'a, NounForm>;

    fn into_iter(self) -> Self::IntoIter {
        self.forms.iter()
    }
}

impl fmt::Display for Paradigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let forms: Vec<String> = self.forms.iter().map(NounForm::to_string).collect();
        f.write_str(&forms.join(", "))
    }
}

fn first_ending<'t>(
    table: &'t EndingTable,
    gender: Gender,
    number: Number,
    case: Case,
) -> Result<&'t str, AnalysisError> {
    table
        .get(gender, number, case)
        .first()
        .map(String::as_str)
        .ok_or_else(|| {
            AnalysisError::InternalError(format!("no {gender} {number} {case} ending in table"))
        })
}

/// Builds a feminine plural on a `t`-final stem, agreeing with its theme vowel.
///
/// The theme vowel is the long vowel three letters from the end of the
/// stem, `ā` otherwise. `šarrat` > `šarrātum`, `ilt` > `ilātum`,
/// `nār` > `nārātum`.
fn feminine_plural(stem: &[Letter], variants: &[String]) -> Result<String, AnalysisError> {
    let n = stem.len();
    let from_end = |k: usize| n.checked_sub(k).map(|i| stem[i]);

    let theme = from_end(3)
        .filter(|l| l.is_macron_vowel())
        .map_or(DEFAULT_THEME_VOWEL, Letter::char);

    let ending = variants
        .iter()
        .find(|v| v.starts_with(theme))
        .or_else(|| {
            debug!(%theme, "no plural variant for theme vowel, using the default");
            variants.iter().find(|v| v.starts_with(DEFAULT_THEME_VOWEL))
        })
        .or_else(|| variants.first())
        .ok_or_else(|| AnalysisError::InternalError("no feminine plural endings in table".into()))?;

    let keep = if from_end(2).is_some_and(Letter::is_short_vowel) {
        n - 2
    } else if from_end(1).is_some_and(Letter::is_consonant)
        && from_end(2).is_some_and(Letter::is_macron_vowel)
    {
        n
    } else {
        n.saturating_sub(1)
    };

    Ok(letters_to_string(&stem[..keep]) + ending)
}

/// Declines `noun` through all seven case/number slots.
pub fn decline_noun(
    table: &EndingTable,
    noun: &Word,
    gender: Gender,
) -> Result<Paradigm, AnalysisError> {
    let stem = get_stem(table, noun, gender)?;
    let stem_letters = letters_of(&stem)?;

    let forms = SLOTS
        .iter()
        .map(|&(number, case)| -> Result<NounForm, AnalysisError> {
            let form = match (gender, number) {
                (Gender::Masculine, _) => stem.clone() + first_ending(table, gender, number, case)?,
                (Gender::Feminine, Number::Plural) => {
                    feminine_plural(&stem_letters, table.get(gender, number, case))?
                }
                (Gender::Feminine, _) => {
                    // The stem already carries the feminine `t`.
                    let ending = first_ending(table, gender, number, case)?;
                    stem.clone() + ending.strip_prefix(Letter::T.char()).unwrap_or(ending)
                }
            };
            Ok(NounForm { form, case, number })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(Paradigm {
        stem,
        gender,
        forms,
    })
}

/// Bound (construct) form of a noun, where a rule is known.
///
/// Only stems ending in vowel + consonant are considered, and of those only
/// `ab` and `aḫ` have a rule. `Ok(None)` means the form is not supported.
pub fn get_bound_form(
    table: &EndingTable,
    noun: &Word,
    gender: Gender,
) -> Result<Option<String>, AnalysisError> {
    let stem = get_stem(table, noun, gender)?;
    let pattern = cv_pattern(&letters_of(&stem)?);

    let tail: Vec<SegmentClass> = pattern[pattern.len().saturating_sub(2)..]
        .iter()
        .map(|e| e.class)
        .collect();
    if tail != [SegmentClass::V, SegmentClass::C] {
        return Ok(None);
    }

    if BOUND_FORM_I_STEMS.contains(&stem.as_str()) {
        return Ok(Some(format!("{stem}i")));
    }

    // awīlum > awīl, nakrum > naker, bēlum > bēl: not covered yet.
    let syllables = syllabify(noun).map(|s| s.len()).ok();
    debug!(noun = %noun, stem = %stem, ?syllables, "no bound-form rule for stem");
    Ok(None)
}
