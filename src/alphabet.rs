//! The fixed transliteration alphabet and the `Word` type built on it.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

use crate::AnalysisError;

pub const SHORT_VOWELS: [char; 4] = ['a', 'e', 'i', 'u'];
pub const MACRON_VOWELS: [char; 4] = ['ā', 'ē', 'ī', 'ū'];
pub const CIRCUMFLEX_VOWELS: [char; 4] = ['â', 'ê', 'î', 'û'];
pub const CONSONANTS: [char; 20] = [
    'b', 'd', 'g', 'ḫ', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 'ṣ', 'š', 't', 'ṭ', 'w', 'y', 'z',
    'ʾ',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharClass {
    ShortVowel,
    LongVowelMacron,
    LongVowelCircumflex,
    Consonant,
}

impl CharClass {
    pub fn is_vowel(self) -> bool {
        !matches!(self, CharClass::Consonant)
    }

    pub fn is_consonant(self) -> bool {
        matches!(self, CharClass::Consonant)
    }
}

/// Classifies a single character of the transliteration alphabet.
pub fn classify(c: char) -> Result<CharClass, AnalysisError> {
    if SHORT_VOWELS.contains(&c) {
        Ok(CharClass::ShortVowel)
    } else if MACRON_VOWELS.contains(&c) {
        Ok(CharClass::LongVowelMacron)
    } else if CIRCUMFLEX_VOWELS.contains(&c) {
        Ok(CharClass::LongVowelCircumflex)
    } else if CONSONANTS.contains(&c) {
        Ok(CharClass::Consonant)
    } else {
        Err(AnalysisError::UnknownCharacter(c))
    }
}

pub fn is_vowel(c: char) -> bool {
    classify(c).is_ok_and(CharClass::is_vowel)
}

pub fn is_consonant(c: char) -> bool {
    classify(c).is_ok_and(CharClass::is_consonant)
}

/// Maps a macron or circumflex vowel to its short counterpart.
pub fn normalize_vowel(c: char) -> char {
    MACRON_VOWELS
        .iter()
        .position(|&v| v == c)
        .or_else(|| CIRCUMFLEX_VOWELS.iter().position(|&v| v == c))
        .map_or(c, |i| SHORT_VOWELS[i])
}

/// A character known to belong to the alphabet, together with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter {
    ch: char,
    class: CharClass,
}

impl Letter {
    pub(crate) const T: Letter = Letter {
        ch: 't',
        class: CharClass::Consonant,
    };

    pub fn new(ch: char) -> Result<Self, AnalysisError> {
        Ok(Self {
            ch,
            class: classify(ch)?,
        })
    }

    pub fn char(self) -> char {
        self.ch
    }

    pub fn class(self) -> CharClass {
        self.class
    }

    pub fn is_vowel(self) -> bool {
        self.class.is_vowel()
    }

    pub fn is_consonant(self) -> bool {
        self.class.is_consonant()
    }

    pub fn is_short_vowel(self) -> bool {
        self.class == CharClass::ShortVowel
    }

    pub fn is_macron_vowel(self) -> bool {
        self.class == CharClass::LongVowelMacron
    }

    pub fn is_circumflex_vowel(self) -> bool {
        self.class == CharClass::LongVowelCircumflex
    }

    /// The letter with vowel length removed.
    pub fn normalized(self) -> char {
        normalize_vowel(self.ch)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ch)
    }
}

/// Parses every character of `s` as a letter. The empty string yields an empty sequence.
pub(crate) fn letters_of(s: &str) -> Result<Vec<Letter>, AnalysisError> {
    s.chars().map(Letter::new).collect()
}

pub(crate) fn letters_to_string(letters: &[Letter]) -> String {
    letters.iter().map(|l| l.ch).collect()
}

/// One transliterated token: non-empty, NFC-normalized, every character in the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: Vec<Letter>,
}

impl Word {
    pub fn parse(s: &str) -> Result<Self, AnalysisError> {
        let text: String = s.trim().nfc().collect();
        if text.is_empty() {
            return Err(AnalysisError::EmptyWord);
        }
        let letters = letters_of(&text)?;
        Ok(Self { text, letters })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Number of letters, not bytes.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always `false`: `parse` rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl FromStr for Word {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Word::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_inventory_letter() {
        for c in SHORT_VOWELS {
            assert_eq!(classify(c).unwrap(), CharClass::ShortVowel);
        }
        for c in MACRON_VOWELS {
            assert_eq!(classify(c).unwrap(), CharClass::LongVowelMacron);
        }
        for c in CIRCUMFLEX_VOWELS {
            assert_eq!(classify(c).unwrap(), CharClass::LongVowelCircumflex);
        }
        for c in CONSONANTS {
            assert_eq!(classify(c).unwrap(), CharClass::Consonant);
        }
    }

    #[test]
    fn rejects_letters_outside_the_inventory() {
        for c in ['o', 'x', 'h', 'A', '-', ' '] {
            assert!(matches!(classify(c), Err(AnalysisError::UnknownCharacter(x)) if x == c));
            assert!(!is_vowel(c));
            assert!(!is_consonant(c));
        }
    }

    #[test]
    fn normalizes_vowel_length() {
        assert_eq!(normalize_vowel('ā'), 'a');
        assert_eq!(normalize_vowel('ê'), 'e');
        assert_eq!(normalize_vowel('ū'), 'u');
        assert_eq!(normalize_vowel('î'), 'i');
        assert_eq!(normalize_vowel('i'), 'i');
        assert_eq!(normalize_vowel('š'), 'š');
    }

    #[test]
    fn word_composes_combining_marks() {
        // "a" + combining macron, "t" + combining dot below
        let decomposed = "bala\u{0304}t\u{0323}i\u{0304}";
        let word = Word::parse(decomposed).unwrap();
        assert_eq!(word.as_str(), "balāṭī");
        assert!(!word.is_empty());
        assert_eq!(word.len(), 6);
    }

    #[test]
    fn word_rejects_empty_and_foreign_input() {
        assert!(matches!(Word::parse("   "), Err(AnalysisError::EmptyWord)));
        assert!(matches!(
            Word::parse("ilum2"),
            Err(AnalysisError::UnknownCharacter('2'))
        ));
    }
}
