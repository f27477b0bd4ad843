// Copyright (c) 2024 PostFinance AG
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use log::{debug, trace};
use rand::CryptoRng;

use crate::error::{Error, Result};
use crate::random::{shuffle, uniform_below};

/// Shortest password that can hold one character of every class.
pub const MIN_GENERATED_LENGTH: usize = 3;

/// The character classes every generated password contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 3] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
    ];

    pub fn alphabet(self) -> &'static [u8] {
        match self {
            CharacterClass::Uppercase => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharacterClass::Lowercase => b"abcdefghijklmnopqrstuvwxyz",
            CharacterClass::Digit => b"0123456789",
        }
    }

    pub fn contains(self, c: char) -> bool {
        match self {
            CharacterClass::Uppercase => c.is_ascii_uppercase(),
            CharacterClass::Lowercase => c.is_ascii_lowercase(),
            CharacterClass::Digit => c.is_ascii_digit(),
        }
    }

    pub fn of(c: char) -> Option<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .find(|class| class.contains(c))
    }
}

/// Generates a random password of exactly `length` characters.
///
/// The password holds at least one uppercase letter, one lowercase letter and
/// one digit. Randomness comes from the thread-local CSPRNG (ChaCha, seeded by
/// the operating system); the handle lives for this call only.
///
/// Fails with [`Error::InvalidArgument`] if `length` is below
/// [`MIN_GENERATED_LENGTH`].
pub fn generate(length: usize) -> Result<String> {
    check_length(length)?;

    let mut rng = rand::rng();
    generate_with(length, &mut rng)
}

/// Same as [`generate`], drawing from the given cryptographically secure `rng`.
pub fn generate_with<R: CryptoRng + ?Sized>(length: usize, rng: &mut R) -> Result<String> {
    check_length(length)?;
    trace!("Generating random password of length {length}");

    let mut password: Vec<char> = Vec::with_capacity(length);

    // Two characters stay reserved for the lowercase and digit segments.
    let uppercase = random_length(length - 2, rng);
    fill(&mut password, CharacterClass::Uppercase, uppercase, rng);

    let lowercase = random_length(length - 1 - password.len(), rng);
    fill(&mut password, CharacterClass::Lowercase, lowercase, rng);

    let digits = length - password.len();
    fill(&mut password, CharacterClass::Digit, digits, rng);

    trace!("Segment lengths: {uppercase} uppercase, {lowercase} lowercase, {digits} digits");

    shuffle(&mut password, rng);

    Ok(password.into_iter().collect())
}

fn check_length(length: usize) -> Result<()> {
    if length < MIN_GENERATED_LENGTH {
        debug!("Rejecting password length {length}");
        return Err(Error::invalid_argument("length", length, "too short"));
    }

    Ok(())
}

// A zero draw is clamped to 1 so every segment is non-empty.
fn random_length<R: CryptoRng + ?Sized>(limit: usize, rng: &mut R) -> usize {
    uniform_below(limit, rng).max(1)
}

fn fill<R: CryptoRng + ?Sized>(
    password: &mut Vec<char>,
    class: CharacterClass,
    count: usize,
    rng: &mut R,
) {
    let alphabet = class.alphabet();
    for _ in 0..count {
        let index = uniform_below(alphabet.len(), rng);
        password.push(char::from(alphabet[index]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRng;

    fn has_all_classes(password: &str) -> bool {
        CharacterClass::ALL
            .iter()
            .all(|class| password.chars().any(|c| class.contains(c)))
    }

    #[test]
    fn alphabet_sizes() {
        assert_eq!(CharacterClass::Uppercase.alphabet().len(), 26);
        assert_eq!(CharacterClass::Lowercase.alphabet().len(), 26);
        assert_eq!(CharacterClass::Digit.alphabet().len(), 10);
    }

    #[test]
    fn classify_characters() {
        assert_eq!(CharacterClass::of('Q'), Some(CharacterClass::Uppercase));
        assert_eq!(CharacterClass::of('q'), Some(CharacterClass::Lowercase));
        assert_eq!(CharacterClass::of('7'), Some(CharacterClass::Digit));
        assert_eq!(CharacterClass::of('_'), None);
        assert_eq!(CharacterClass::of('É'), None);
    }

    #[test]
    fn password_length() {
        for length in vec![3, 4, 8, 16, 32, 300] {
            let password = generate(length).unwrap();
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn password_content() {
        for length in 3..64 {
            let password = generate(length).unwrap();
            assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(has_all_classes(&password), "{password}");
        }
    }

    #[test]
    fn too_short_length_is_rejected() {
        for length in 0..MIN_GENERATED_LENGTH {
            let err = generate(length).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidArgument { name: "length", value, .. } if value == length
            ));
            assert!(err.to_string().contains("too short"));
        }
    }

    #[test]
    fn rejected_length_draws_no_entropy() {
        let mut rng = ScriptedRng::new(&[]);
        assert!(generate_with(2, &mut rng).is_err());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn minimum_length_has_one_of_each_class() {
        // random_length(1) always clamps to 1, leaving one digit
        let mut rng = ScriptedRng::new(&[9, 0, 9, 1, 2, 0, 1]);

        let password = generate_with(3, &mut rng).unwrap();

        assert_eq!(password, "2bA");
        assert_eq!(rng.consumed(), 7);
    }

    #[test]
    fn minimum_length_always_valid() {
        for _ in 0..1_000 {
            let password = generate(3).unwrap();
            let mut classes: Vec<_> = password.chars().filter_map(CharacterClass::of).collect();
            classes.sort_by_key(|class| *class as u8);
            assert_eq!(classes, CharacterClass::ALL.to_vec());
        }
    }

    #[test]
    fn segments_follow_drawn_lengths() {
        let mut rng = ScriptedRng::new(&[
            5, // 5 uppercase
            0, 1, 2, 3, 4, // ABCDE
            2, // 2 lowercase
            25, 24, // zy
            0, 9, 5, // 3 digits
            9, 8, 7, 6, 5, 4, 3, 2, 1, // identity shuffle
        ]);

        let password = generate_with(10, &mut rng).unwrap();

        assert_eq!(password, "ABCDEzy095");
    }

    #[test]
    fn random_length_clamps_zero() {
        let mut rng = ScriptedRng::new(&[0, 2]);
        assert_eq!(random_length(3, &mut rng), 1);
        assert_eq!(random_length(3, &mut rng), 2);
    }

    #[test]
    fn passwords_do_not_repeat() {
        let first = generate(20).unwrap();
        let second = generate(20).unwrap();
        assert_ne!(first, second);
    }
}
