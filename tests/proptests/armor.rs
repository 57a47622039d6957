//! Property tests for share armor

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sharevault::armor::{VERSION_WORD, armor_share, parse_share};
use sharevault::domain::{ShareIndex, SharingConfig};
use sharevault::field::PrimeField;
use sharevault::{Error, Share};

/// A share valid under its own configuration
#[derive(Clone, Debug)]
struct ArbitraryShare {
    config: SharingConfig,
    share: Share,
}

impl Arbitrary for ArbitraryShare {
    fn arbitrary(g: &mut Gen) -> Self {
        let share_count = (u16::arbitrary(g) % 254) + 2; // 2..=255
        let threshold = (u16::arbitrary(g) % (share_count - 1)) + 2;
        let index = (u16::arbitrary(g) % share_count) + 1;
        let value = u64::arbitrary(g) % PrimeField::MERSENNE_61;

        let config = SharingConfig::with_defaults(threshold, share_count)
            .unwrap_or_else(|e| unreachable!("generated parameters are valid: {e}"));
        let index =
            ShareIndex::new(index).unwrap_or_else(|e| unreachable!("index is non-zero: {e}"));
        ArbitraryShare {
            config,
            share: Share::new(index, value),
        }
    }
}

/// Test that armoring preserves the share and its parameters
#[quickcheck]
fn prop_armor_round_trip(input: ArbitraryShare) -> bool {
    let Ok(mnemonic) = armor_share(&input.config, &input.share) else {
        return false;
    };

    mnemonic.as_str().starts_with(VERSION_WORD)
        && parse_share(mnemonic.as_str())
            .is_ok_and(|parsed| parsed == (input.config, input.share))
}

/// Test that replacing any data word is detected
#[quickcheck]
fn prop_corrupted_word_rejected(input: ArbitraryShare, position: usize, replacement: u16) -> bool {
    let Ok(mnemonic) = armor_share(&input.config, &input.share) else {
        return false;
    };

    let mut words: Vec<&str> = mnemonic.as_str().split_whitespace().collect();
    let position = 1 + position % (words.len() - 1);
    let wordlist = bip39::Language::English.word_list();
    let mut replacement = usize::from(replacement) % wordlist.len();
    if wordlist[replacement] == words[position] {
        replacement = (replacement + 1) % wordlist.len();
    }
    words[position] = wordlist[replacement];

    matches!(
        parse_share(&words.join(" ")),
        Err(Error::Encoding(_) | Error::InvalidParameters(_))
    )
}

/// Test that anything without the version word is rejected
#[quickcheck]
fn prop_invalid_version_word_rejected(words: Vec<String>) -> bool {
    let mnemonic = words.join(" ");
    if mnemonic
        .split_whitespace()
        .next()
        .is_some_and(|w| w.eq_ignore_ascii_case(VERSION_WORD))
    {
        return true;
    }
    parse_share(&mnemonic).is_err()
}
