//! Okurigana classification.
//!
//! Dictionary entries for conjugating words are keyed by their stem followed by
//! one ASCII letter naming the consonant row of the first kana of the tail
//! ("たべr" for 食べる). The romanization is historically irregular
//! (し is `s`, not `sh`), so the mapping is a fixed table.

/// Small tsu, the geminate marker.
pub const SOKUON: char = 'っ';

static OKURI_CLASSES: &[(&str, char)] = &[
    ("あ", 'a'),
    ("い", 'i'),
    ("う", 'u'),
    ("え", 'e'),
    ("お", 'o'),
    ("か", 'k'),
    ("き", 'k'),
    ("く", 'k'),
    ("け", 'k'),
    ("こ", 'k'),
    ("っか", 'k'),
    ("っき", 'k'),
    ("っく", 'k'),
    ("っけ", 'k'),
    ("っこ", 'k'),
    ("さ", 's'),
    ("し", 's'),
    ("す", 's'),
    ("せ", 's'),
    ("そ", 's'),
    ("っさ", 's'),
    ("っし", 's'),
    ("っす", 's'),
    ("っせ", 's'),
    ("っそ", 's'),
    ("た", 't'),
    ("ち", 't'),
    ("つ", 't'),
    ("て", 't'),
    ("と", 't'),
    ("った", 't'),
    ("っち", 't'),
    ("っつ", 't'),
    ("って", 't'),
    ("っと", 't'),
    ("な", 'n'),
    ("に", 'n'),
    ("ぬ", 'n'),
    ("ね", 'n'),
    ("の", 'n'),
    ("は", 'h'),
    ("ひ", 'h'),
    ("ふ", 'h'),
    ("へ", 'h'),
    ("ほ", 'h'),
    ("っは", 'h'),
    ("っひ", 'h'),
    ("っふ", 'h'),
    ("っへ", 'h'),
    ("っほ", 'h'),
    ("ま", 'm'),
    ("み", 'm'),
    ("む", 'm'),
    ("め", 'm'),
    ("も", 'm'),
    ("っま", 'm'),
    ("っみ", 'm'),
    ("っむ", 'm'),
    ("っめ", 'm'),
    ("っも", 'm'),
    ("や", 'y'),
    ("ゆ", 'y'),
    ("よ", 'y'),
    ("っや", 'y'),
    ("っゆ", 'y'),
    ("っよ", 'y'),
    ("ら", 'r'),
    ("り", 'r'),
    ("る", 'r'),
    ("れ", 'r'),
    ("ろ", 'r'),
    ("っら", 'r'),
    ("っり", 'r'),
    ("っる", 'r'),
    ("っれ", 'r'),
    ("っろ", 'r'),
    ("わ", 'w'),
    ("っわ", 'w'),
    ("が", 'g'),
    ("ぎ", 'g'),
    ("ぐ", 'g'),
    ("げ", 'g'),
    ("ご", 'g'),
    ("っが", 'g'),
    ("っぎ", 'g'),
    ("っぐ", 'g'),
    ("っげ", 'g'),
    ("っご", 'g'),
    ("ざ", 'z'),
    ("じ", 'z'),
    ("ず", 'z'),
    ("ぜ", 'z'),
    ("ぞ", 'z'),
    ("っざ", 'z'),
    ("っじ", 'z'),
    ("っず", 'z'),
    ("っぜ", 'z'),
    ("っぞ", 'z'),
    ("だ", 'd'),
    ("ぢ", 'd'),
    ("づ", 'd'),
    ("で", 'd'),
    ("ど", 'd'),
    ("っだ", 'd'),
    ("っぢ", 'd'),
    ("っづ", 'd'),
    ("っで", 'd'),
    ("っど", 'd'),
    ("ば", 'b'),
    ("び", 'b'),
    ("ぶ", 'b'),
    ("べ", 'b'),
    ("ぼ", 'b'),
    ("っば", 'b'),
    ("っび", 'b'),
    ("っぶ", 'b'),
    ("っべ", 'b'),
    ("っぼ", 'b'),
    ("ぱ", 'p'),
    ("ぴ", 'p'),
    ("ぷ", 'p'),
    ("ぺ", 'p'),
    ("ぽ", 'p'),
    ("っぱ", 'p'),
    ("っぴ", 'p'),
    ("っぷ", 'p'),
    ("っぺ", 'p'),
    ("っぽ", 'p'),
];

/// Consonant-row letter for a kana syllable or a `っ`-prefixed syllable.
///
/// Returns `None` for syllables that cannot start an inflectional tail
/// (ん, a lone っ, small kana, punctuation, the empty string).
pub fn classify(syllable: &str) -> Option<char> {
    OKURI_CLASSES
        .iter()
        .find(|&&(k, _)| k == syllable)
        .map(|&(_, v)| v)
}

/// The syllable at the head of an okurigana tail that decides its class.
///
/// A leading っ takes the following kana with it; a tail that is only っ has
/// no classifiable syllable and yields `""`.
pub fn head_syllable(tail: &str) -> &str {
    let mut chars = tail.char_indices();
    match chars.next() {
        None => "",
        Some((_, SOKUON)) => match chars.nth(1) {
            Some((end, _)) => &tail[..end],
            None if tail.chars().count() >= 2 => tail,
            None => "",
        },
        Some((_, c)) => &tail[..c.len_utf8()],
    }
}

/// Build the okuri-marked key for `stem` followed by `tail`, if the tail's
/// head syllable is classifiable.
pub fn okuri_key(stem: &str, tail: &str) -> Option<String> {
    let letter = classify(head_syllable(tail))?;
    let mut key = String::with_capacity(stem.len() + 1);
    key.push_str(stem);
    key.push(letter);
    Some(key)
}

/// True if `key` carries a trailing okuri letter.
///
/// A bare letter is not an okuri key: it needs a reading in front of it.
pub fn is_okuri_key(key: &str) -> bool {
    key.chars().last().is_some_and(|c| c.is_ascii_lowercase()) && key.chars().count() > 1
}

/// Split a dictionary key into its reading and optional okuri letter.
pub fn split_okuri_key(key: &str) -> (&str, Option<char>) {
    if is_okuri_key(key) {
        let (reading, letter) = key.split_at(key.len() - 1);
        (reading, letter.chars().next())
    } else {
        (key, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_rows() {
        assert_eq!(classify("あ"), Some('a'));
        assert_eq!(classify("か"), Some('k'));
        assert_eq!(classify("っか"), Some('k'));
        assert_eq!(classify("し"), Some('s'));
        assert_eq!(classify("る"), Some('r'));
        assert_eq!(classify("っぽ"), Some('p'));
        assert_eq!(classify("わ"), Some('w'));
    }

    #[test]
    fn classify_misses() {
        assert_eq!(classify("ん"), None);
        assert_eq!(classify("っ"), None);
        assert_eq!(classify("ゃ"), None);
        assert_eq!(classify("っな"), None);
        assert_eq!(classify("。"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("かき"), None);
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        let mut keys: Vec<&str> = OKURI_CLASSES.iter().map(|&(k, _)| k).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), OKURI_CLASSES.len());
        assert_eq!(OKURI_CLASSES.len(), 128);
    }

    #[test]
    fn head_syllable_cases() {
        assert_eq!(head_syllable("る"), "る");
        assert_eq!(head_syllable("べる"), "べ");
        assert_eq!(head_syllable("った"), "った");
        assert_eq!(head_syllable("ったら"), "った");
        assert_eq!(head_syllable("っ"), "");
        assert_eq!(head_syllable(""), "");
    }

    #[test]
    fn okuri_key_building() {
        assert_eq!(okuri_key("たべ", "る").as_deref(), Some("たべr"));
        assert_eq!(okuri_key("い", "った").as_deref(), Some("いt"));
        assert_eq!(okuri_key("ほ", "ん"), None);
        assert_eq!(okuri_key("ま", "っ"), None);
    }

    #[test]
    fn split_keys() {
        assert_eq!(split_okuri_key("たべr"), ("たべ", Some('r')));
        assert_eq!(split_okuri_key("たべる"), ("たべる", None));
        assert!(is_okuri_key("かk"));
        assert!(!is_okuri_key("k"));
        assert!(!is_okuri_key(""));
    }
}
