//! Consonant/vowel skeletons such as `V₁C₁V₂C₂C₂V₂C₃` for `iparras`.

use serde::Serialize;
use std::fmt;

use crate::AnalysisError;
use crate::alphabet::Letter;

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentClass {
    C,
    V,
}

impl fmt::Display for SegmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SegmentClass::C => "C",
            SegmentClass::V => "V",
        })
    }
}

/// One position of a CV pattern.
///
/// `index` is the 1-based rank of the distinct (length-normalized) letter
/// within its class; repeated letters reuse the index of their first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CvEntry {
    pub class: SegmentClass,
    pub index: usize,
    pub letter: char,
}

pub fn cv_pattern(letters: &[Letter]) -> Vec<CvEntry> {
    let mut seen: Vec<(char, usize)> = Vec::new();
    let mut consonants = 0;
    let mut vowels = 0;

    letters
        .iter()
        .map(|letter| {
            let (class, counter) = if letter.is_consonant() {
                (SegmentClass::C, &mut consonants)
            } else {
                (SegmentClass::V, &mut vowels)
            };
            let normalized = letter.normalized();

            let index = match seen.iter().find(|(c, _)| *c == normalized) {
                Some(&(_, index)) => index,
                None => {
                    *counter += 1;
                    seen.push((normalized, *counter));
                    *counter
                }
            };

            CvEntry {
                class,
                index,
                letter: normalized,
            }
        })
        .collect()
}

/// Renders a pattern with subscript indices. Only indices up to 9 have a subscript form.
pub fn render_cv_pattern(pattern: &[CvEntry]) -> Result<String, AnalysisError> {
    let mut out = String::with_capacity(pattern.len() * 4);
    for entry in pattern {
        let subscript = SUBSCRIPTS
            .get(entry.index)
            .ok_or(AnalysisError::SubscriptOutOfRange { index: entry.index })?;
        out.push_str(&entry.class.to_string());
        out.push(*subscript);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::letters_of;

    #[test]
    fn iparras() {
        let pattern = cv_pattern(&letters_of("iparras").unwrap());
        let triples: Vec<(SegmentClass, usize, char)> = pattern
            .iter()
            .map(|e| (e.class, e.index, e.letter))
            .collect();
        assert_eq!(
            triples,
            [
                (SegmentClass::V, 1, 'i'),
                (SegmentClass::C, 1, 'p'),
                (SegmentClass::V, 2, 'a'),
                (SegmentClass::C, 2, 'r'),
                (SegmentClass::C, 2, 'r'),
                (SegmentClass::V, 2, 'a'),
                (SegmentClass::C, 3, 's'),
            ]
        );
        assert_eq!(render_cv_pattern(&pattern).unwrap(), "V₁C₁V₂C₂C₂V₂C₃");
    }

    #[test]
    fn long_and_short_vowels_share_an_index() {
        let pattern = cv_pattern(&letters_of("balāṭa").unwrap());
        assert_eq!(render_cv_pattern(&pattern).unwrap(), "C₁V₁C₂V₁C₃V₁");
        assert_eq!(pattern[3].letter, 'a');
    }

    #[test]
    fn ten_distinct_consonants_cannot_be_rendered() {
        let pattern = cv_pattern(&letters_of("badagaḫakalamanapaq").unwrap());
        assert_eq!(pattern.last().unwrap().index, 10);
        assert!(matches!(
            render_cv_pattern(&pattern),
            Err(AnalysisError::SubscriptOutOfRange { index: 10 })
        ));
    }
}
