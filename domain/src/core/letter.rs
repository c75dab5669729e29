//! Option letters (A..H)

use crate::core::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Letter shown to the group for an option. At most eight are in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 8] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
        OptionLetter::E,
        OptionLetter::F,
        OptionLetter::G,
        OptionLetter::H,
    ];

    /// Letter at a zero-based position, if within A..H
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based position (A = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }

    /// First letter in A..H not present in `used`
    pub fn next_unused(used: &[OptionLetter]) -> Option<Self> {
        Self::ALL.into_iter().find(|letter| !used.contains(letter))
    }

    /// Next unused letter, or a uniformly random one once all eight are taken.
    ///
    /// The random fallback knowingly reuses a letter.
    pub fn next_or_random(used: &[OptionLetter], rng: &mut dyn RandomSource) -> Self {
        Self::next_unused(used).unwrap_or_else(|| Self::ALL[rng.pick_index(Self::ALL.len())])
    }
}

impl std::fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for OptionLetter {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(format!("Invalid option letter: {}", c));
        }
        Self::from_index((upper as u8 - b'A') as usize)
            .ok_or_else(|| format!("Option letter out of range A-H: {}", c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;

    #[test]
    fn test_letter_index_roundtrip() {
        for (i, letter) in OptionLetter::ALL.iter().enumerate() {
            assert_eq!(letter.index(), i);
            assert_eq!(OptionLetter::from_index(i), Some(*letter));
        }
        assert_eq!(OptionLetter::from_index(8), None);
    }

    #[test]
    fn test_as_char() {
        assert_eq!(OptionLetter::A.as_char(), 'A');
        assert_eq!(OptionLetter::H.to_string(), "H");
    }

    #[test]
    fn test_try_from_char() {
        assert_eq!(OptionLetter::try_from('c'), Ok(OptionLetter::C));
        assert!(OptionLetter::try_from('Z').is_err());
        assert!(OptionLetter::try_from('3').is_err());
    }

    #[test]
    fn test_next_unused_skips_taken_letters() {
        let used = [OptionLetter::A, OptionLetter::B, OptionLetter::D];
        assert_eq!(OptionLetter::next_unused(&used), Some(OptionLetter::C));
        assert_eq!(OptionLetter::next_unused(&OptionLetter::ALL), None);
    }

    #[test]
    fn test_next_or_random_when_exhausted() {
        let mut rng = SeededRandom::from_seed(7);
        let letter = OptionLetter::next_or_random(&OptionLetter::ALL, &mut rng);
        assert!(OptionLetter::ALL.contains(&letter));

        let letter = OptionLetter::next_or_random(&[OptionLetter::A], &mut rng);
        assert_eq!(letter, OptionLetter::B);
    }
}
