//! Syllabification and syllable weight.
//!
//! Segmentation follows three constraints: every syllable has exactly one
//! vowel; a syllable may begin with a vowel only at the start of the word or
//! after another vowel; no syllable begins or ends with two consonants.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

use crate::AnalysisError;
use crate::alphabet::{CharClass, Letter, Word};

/// A single syllable: an optional onset, one vowel nucleus and an optional coda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syllable {
    onset: Option<Letter>,
    nucleus: Letter,
    coda: Option<Letter>,
}

impl Syllable {
    fn new(onset: Option<Letter>, nucleus: Letter, coda: Option<Letter>) -> Self {
        debug_assert!(nucleus.is_vowel());
        debug_assert!(onset.is_none_or(Letter::is_consonant));
        debug_assert!(coda.is_none_or(Letter::is_consonant));
        Self {
            onset,
            nucleus,
            coda,
        }
    }

    pub fn onset(&self) -> Option<Letter> {
        self.onset
    }

    pub fn nucleus(&self) -> Letter {
        self.nucleus
    }

    pub fn coda(&self) -> Option<Letter> {
        self.coda
    }

    pub fn letters(&self) -> impl Iterator<Item = Letter> {
        self.onset
            .into_iter()
            .chain(std::iter::once(self.nucleus))
            .chain(self.coda)
    }

    pub fn text(&self) -> String {
        self.letters().map(Letter::char).collect()
    }

    pub fn weight(&self) -> Weight {
        classify_weight(self)
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl Serialize for Syllable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Weight {
    Light,
    Heavy,
    Ultraheavy,
}

impl Weight {
    /// Heavy or ultraheavy.
    pub fn is_heavy(self) -> bool {
        self >= Weight::Heavy
    }

    /// One-letter code: `L`, `H` or `U`.
    pub fn code(self) -> &'static str {
        match self {
            Weight::Light => "L",
            Weight::Heavy => "H",
            Weight::Ultraheavy => "U",
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weight::Light => "Light",
            Weight::Heavy => "Heavy",
            Weight::Ultraheavy => "Ultraheavy",
        };
        f.write_str(name)
    }
}

/// Classifies a syllable by its nucleus length and whether it is closed.
///
/// * ultraheavy: `-â`, `-bâ`, `-āk`, `-bāk`, `-âk`, `-bâk`
/// * heavy: `-ā`, `-bā`, `-ak`, `-bak`
/// * light: `-a`, `-ba`
pub fn classify_weight(syllable: &Syllable) -> Weight {
    let closed = syllable.coda.is_some();
    match (syllable.nucleus.class(), closed) {
        (CharClass::LongVowelCircumflex, _) => Weight::Ultraheavy,
        (CharClass::LongVowelMacron, true) => Weight::Ultraheavy,
        (CharClass::LongVowelMacron, false) => Weight::Heavy,
        (CharClass::ShortVowel, true) => Weight::Heavy,
        (CharClass::ShortVowel, false) => Weight::Light,
        (CharClass::Consonant, _) => unreachable!("syllable nucleus is always a vowel"),
    }
}

/// Splits a word into syllables, left to right.
///
/// A word-initial vowel forms its own syllable when the third letter is not
/// a consonant (this keeps `VCC` openings together, e.g. `ib-nû`). The rest
/// of the word is then segmented from the end backwards, preferring `CV`,
/// then `CVC`, then `VC`.
pub fn syllabify(word: &Word) -> Result<Vec<Syllable>, AnalysisError> {
    let letters = word.letters();
    let mut initial = None;
    let mut rest = letters;

    if let [first, _, third, ..] = letters
        && first.is_vowel()
        && !third.is_consonant()
    {
        initial = Some(Syllable::new(None, *first, None));
        rest = &letters[1..];
    }
    let offset = letters.len() - rest.len();

    let mut backwards = Vec::with_capacity(rest.len() / 2 + 1);
    let mut end = rest.len();

    while end > 0 {
        let current = rest[end - 1];
        let previous = end.checked_sub(2).map(|i| rest[i]);

        if current.is_vowel() {
            match previous {
                Some(onset) if onset.is_consonant() => {
                    backwards.push(Syllable::new(Some(onset), current, None));
                    end -= 2;
                }
                _ => {
                    // Word-initial vowel, or the second of two vowels.
                    backwards.push(Syllable::new(None, current, None));
                    end -= 1;
                }
            }
            continue;
        }

        let Some(nucleus) = previous.filter(|l| l.is_vowel()) else {
            debug!(word = %word, position = offset + end - 1, "no syllable ends here");
            return Err(AnalysisError::MalformedWord {
                word: word.to_string(),
                position: offset + end - 1,
            });
        };

        if end == 2 {
            backwards.push(Syllable::new(None, nucleus, Some(current)));
            end = 0;
        } else if rest[end - 3].is_consonant() {
            backwards.push(Syllable::new(Some(rest[end - 3]), nucleus, Some(current)));
            end -= 3;
        } else {
            backwards.push(Syllable::new(None, nucleus, Some(current)));
            end -= 2;
        }
    }

    Ok(initial.into_iter().chain(backwards.into_iter().rev()).collect())
}
