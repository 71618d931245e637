//! Word stress.
//!
//! 1. An ultraheavy final syllable is stressed.
//! 2. Otherwise the last non-final heavy or ultraheavy syllable is stressed.
//! 3. Otherwise the first syllable is stressed.

use serde::Serialize;

use crate::syllable::{Syllable, Weight, classify_weight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightedSyllable {
    pub syllable: Syllable,
    pub weight: Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StressedSyllable {
    pub syllable: Syllable,
    pub weight: Weight,
    pub stressed: bool,
}

pub fn weigh(syllables: &[Syllable]) -> Vec<WeightedSyllable> {
    syllables
        .iter()
        .map(|&syllable| WeightedSyllable {
            syllable,
            weight: classify_weight(&syllable),
        })
        .collect()
}

/// Index of the stressed syllable, or `None` for an empty sequence.
pub fn stressed_index(weights: &[Weight]) -> Option<usize> {
    let (&last, non_final) = weights.split_last()?;
    if last == Weight::Ultraheavy {
        return Some(weights.len() - 1);
    }

    let mut stressed = 0;
    for (i, weight) in non_final.iter().enumerate() {
        if weight.is_heavy() {
            stressed = i;
        }
    }
    Some(stressed)
}

/// Marks exactly one syllable of a non-empty sequence as stressed, preserving order.
pub fn assign_stress(weighted: &[WeightedSyllable]) -> Vec<StressedSyllable> {
    let weights: Vec<Weight> = weighted.iter().map(|w| w.weight).collect();
    let stressed = stressed_index(&weights);

    weighted
        .iter()
        .enumerate()
        .map(|(i, w)| StressedSyllable {
            syllable: w.syllable,
            weight: w.weight,
            stressed: Some(i) == stressed,
        })
        .collect()
}

/// Syllables as strings with the stressed one in brackets, e.g. `["i", "[par]", "ras"]`.
pub fn render_stress(syllables: &[StressedSyllable]) -> Vec<String> {
    syllables
        .iter()
        .map(|s| {
            if s.stressed {
                format!("[{}]", s.syllable)
            } else {
                s.syllable.to_string()
            }
        })
        .collect()
}
