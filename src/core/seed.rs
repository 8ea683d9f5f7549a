//! Seed phrase generation and validation (BIP-39, English word list)
//!
//! A [`SeedPhrase`] only exists once its word count, words and checksum have
//! been checked, so everything downstream (derivation, the vault) can take it
//! as already valid.

use std::fmt;

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

use crate::core::errors::{SeedError, WalletError};
use crate::security::redaction::mask_phrase;
use crate::security::secret::{string_to_secret, vec_to_secret, SecretString, SecretVec};

/// Supported phrase lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum WordCount {
    /// 128 bits of entropy.
    #[default]
    Twelve,
    /// 256 bits of entropy.
    TwentyFour,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            WordCount::Twelve => 12,
            WordCount::TwentyFour => 24,
        }
    }

    fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::TwentyFour => 32,
        }
    }
}

impl TryFrom<usize> for WordCount {
    type Error = SeedError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            12 => Ok(WordCount::Twelve),
            24 => Ok(WordCount::TwentyFour),
            other => Err(SeedError::WordCount(other)),
        }
    }
}

impl From<WordCount> for usize {
    fn from(wc: WordCount) -> usize {
        wc.words()
    }
}

/// A validated mnemonic together with its expanded 64-byte binary seed.
///
/// Both the phrase and the seed are zeroized on drop and never shown by
/// `Debug`.
#[derive(Clone)]
pub struct SeedPhrase {
    phrase: SecretString,
    seed: SecretVec,
    word_count: WordCount,
}

impl SeedPhrase {
    fn from_mnemonic(mnemonic: &Mnemonic, word_count: WordCount) -> Self {
        // PBKDF2-HMAC-SHA512, 2048 rounds, salt "mnemonic" (empty passphrase)
        let mut seed = mnemonic.to_seed("");
        let secret = vec_to_secret(seed.to_vec());
        seed.zeroize();

        Self {
            phrase: string_to_secret(mnemonic.to_string()),
            seed: secret,
            word_count,
        }
    }

    /// Space-separated lowercase words.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.phrase.split(' ')
    }

    pub fn word_count(&self) -> WordCount {
        self.word_count
    }

    /// The 64-byte BIP-39 seed derived from this phrase with no passphrase.
    pub fn to_seed(&self) -> &[u8] {
        &self.seed
    }
}

impl PartialEq for SeedPhrase {
    fn eq(&self, other: &Self) -> bool {
        self.phrase.as_str() == other.phrase.as_str()
    }
}

impl Eq for SeedPhrase {}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedPhrase")
            .field("word_count", &self.word_count.words())
            .field("phrase", &"<redacted>")
            .finish()
    }
}

/// Generate a fresh 12-word phrase from OS entropy.
pub fn generate() -> Result<SeedPhrase, WalletError> {
    generate_with(WordCount::Twelve)
}

/// Generate a fresh phrase of the requested length from OS entropy.
pub fn generate_with(word_count: WordCount) -> Result<SeedPhrase, WalletError> {
    let mut entropy = vec![0u8; word_count.entropy_bytes()];
    OsRng.fill_bytes(&mut entropy);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| SeedError::Entropy(e.to_string()));
    entropy.zeroize();

    let mut mnemonic = mnemonic?;
    let phrase = SeedPhrase::from_mnemonic(&mnemonic, word_count);
    mnemonic.zeroize();
    debug!(words = word_count.words(), "Generated seed phrase");
    Ok(phrase)
}

/// Parse and check a user-supplied phrase.
///
/// Words are split on any whitespace and lowercased. Fails with
/// [`WalletError::InvalidSeed`] on a word count other than 12 or 24, a word
/// outside the list, or a checksum mismatch.
pub fn validate(candidate: &str) -> Result<SeedPhrase, WalletError> {
    let words: Vec<SecretString> = candidate
        .split_whitespace()
        .map(|w| string_to_secret(w.to_lowercase()))
        .collect();

    let word_count = WordCount::try_from(words.len())?;

    let list = Language::English.word_list();
    for (i, word) in words.iter().enumerate() {
        if list.binary_search(&word.as_str()).is_err() {
            return Err(SeedError::UnknownWord {
                position: i + 1,
                word: word.as_str().to_string(),
            }
            .into());
        }
    }

    let normalized = string_to_secret(
        words.iter().map(|w| w.as_str()).collect::<Vec<_>>().join(" "),
    );
    let mut mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| map_bip39_error(e, &words))?;

    let phrase = SeedPhrase::from_mnemonic(&mnemonic, word_count);
    mnemonic.zeroize();
    Ok(phrase)
}

/// `true` when `candidate` would pass [`validate`].
pub fn is_valid(candidate: &str) -> bool {
    validate(candidate).is_ok()
}

fn map_bip39_error(err: bip39::Error, words: &[SecretString]) -> SeedError {
    match err {
        bip39::Error::BadWordCount(n) => SeedError::WordCount(n),
        bip39::Error::UnknownWord(i) => SeedError::UnknownWord {
            position: i + 1,
            word: words.get(i).map(|w| w.as_str().to_string()).unwrap_or_default(),
        },
        bip39::Error::InvalidChecksum => SeedError::Checksum,
        other => SeedError::Entropy(other.to_string()),
    }
}

/// Short, non-revealing description of a phrase for logs.
pub fn describe(phrase: &SeedPhrase) -> String {
    mask_phrase(phrase.phrase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn assert_zeroize<T: Zeroize>() {}

    #[test]
    fn test_bip39_mnemonic_is_zeroizable() {
        assert_zeroize::<Mnemonic>();
    }

    // BIP-39 reference vectors (entropy 0x00.., 0x7f.., 0xff..)
    const ABANDON_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const LEGAL_12: &str = "legal winner thank year wave sausage worth useful legal winner thank yellow";
    const ZOO_24: &str = "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo vote";

    #[test_case(ABANDON_12, 12 ; "abandon twelve")]
    #[test_case(LEGAL_12, 12 ; "legal twelve")]
    #[test_case(ZOO_24, 24 ; "zoo twenty four")]
    fn test_validate_reference_vectors(phrase: &str, words: usize) {
        let seed = validate(phrase).unwrap();
        assert_eq!(seed.word_count().words(), words);
        assert_eq!(seed.phrase(), phrase);
        assert_eq!(seed.to_seed().len(), 64);
    }

    #[test]
    fn test_validate_seed_bytes_match_bip39_vector() {
        // entropy 00..00 with an empty passphrase
        let seed = validate(ABANDON_12).unwrap();
        assert_eq!(
            hex::encode(seed.to_seed()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_validate_normalizes_whitespace_and_case() {
        let messy = "  Abandon abandon\tabandon abandon abandon abandon\nabandon abandon abandon abandon abandon ABOUT ";
        let seed = validate(messy).unwrap();
        assert_eq!(seed.phrase(), ABANDON_12);
    }

    #[test_case("" , 0 ; "empty")]
    #[test_case("abandon abandon abandon", 3 ; "three words")]
    #[test_case("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about", 18 ; "eighteen words")]
    fn test_validate_rejects_word_count(phrase: &str, n: usize) {
        match validate(phrase) {
            Err(WalletError::InvalidSeed(SeedError::WordCount(got))) => assert_eq!(got, n),
            other => panic!("expected WordCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_word() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon bitcoinz";
        match validate(phrase) {
            Err(WalletError::InvalidSeed(SeedError::UnknownWord { position, word })) => {
                assert_eq!(position, 12);
                assert_eq!(word, "bitcoinz");
            }
            other => panic!("expected UnknownWord error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_checksum() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(matches!(
            validate(phrase),
            Err(WalletError::InvalidSeed(SeedError::Checksum))
        ));
    }

    #[test_case(WordCount::Twelve ; "twelve")]
    #[test_case(WordCount::TwentyFour ; "twenty four")]
    fn test_generated_phrase_always_validates(wc: WordCount) {
        for _ in 0..16 {
            let generated = generate_with(wc).unwrap();
            assert_eq!(generated.words().count(), wc.words());
            let parsed = validate(generated.phrase()).unwrap();
            assert_eq!(parsed, generated);
            assert_eq!(parsed.to_seed(), generated.to_seed());
        }
    }

    #[test]
    fn test_generate_is_random() {
        let a = generate().unwrap();
        let b = generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let seed = validate(LEGAL_12).unwrap();
        let dbg = format!("{:?}", seed);
        assert!(!dbg.contains("legal"));
        assert!(dbg.contains("12"));
    }

    #[test]
    fn test_word_count_conversions() {
        assert_eq!(WordCount::try_from(24).unwrap(), WordCount::TwentyFour);
        assert!(WordCount::try_from(15).is_err());
        assert_eq!(usize::from(WordCount::Twelve), 12);
    }

    #[test]
    fn test_describe_masks_middle_words() {
        let seed = validate(LEGAL_12).unwrap();
        assert_eq!(describe(&seed), "legal … yellow (12 words)");
    }
}
