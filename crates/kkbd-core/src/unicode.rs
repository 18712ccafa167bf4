//! Character-level kana classification and transliteration.
//!
//! Width and script conversion between hiragana, full-width katakana and
//! half-width katakana, plus voiced-mark (dakuten / handakuten) combination.
//! Voicing is lexically irregular, so it is driven by fixed tables rather than
//! codepoint arithmetic.

/// Offset between a full-width katakana codepoint and its hiragana counterpart.
const KANA_OFFSET: u32 = 0x60;

/// Check the full Hiragana block (U+3040..U+309F). This includes a few unassigned
/// codepoints (U+3040, U+3097-3098) but these never appear in IME input or
/// dictionary readings, so the simpler block-level check is preferred.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Check the half-width katakana range of the Halfwidth Forms block.
pub fn is_half_katakana(c: char) -> bool {
    ('\u{FF61}'..='\u{FF9F}').contains(&c)
}

/// Check if a string is a valid hiragana reading.
///
/// Accepts hiragana characters (U+3040..U+309F) and the prolonged sound mark
/// ー (U+30FC, technically katakana) which commonly appears in readings like
/// "らーめん".
pub fn is_hiragana_reading(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_hiragana(c) || c == 'ー')
}

/// The two voicing marks a kana keyboard can send after a base character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoicingMark {
    /// ゛ (dakuten)
    Dakuten,
    /// ゜ (handakuten)
    Handakuten,
}

/// Classify a character as a voicing mark.
///
/// Recognizes the spacing marks (U+309B / U+309C), the combining marks
/// (U+3099 / U+309A) and the half-width marks (U+FF9E / U+FF9F).
pub fn voicing_mark(c: char) -> Option<VoicingMark> {
    match c {
        '\u{309B}' | '\u{3099}' | '\u{FF9E}' => Some(VoicingMark::Dakuten),
        '\u{309C}' | '\u{309A}' | '\u{FF9F}' => Some(VoicingMark::Handakuten),
        _ => None,
    }
}

static DAKUTEN: &[(char, char)] = &[
    ('う', 'ゔ'),
    ('か', 'が'),
    ('き', 'ぎ'),
    ('く', 'ぐ'),
    ('け', 'げ'),
    ('こ', 'ご'),
    ('さ', 'ざ'),
    ('し', 'じ'),
    ('す', 'ず'),
    ('せ', 'ぜ'),
    ('そ', 'ぞ'),
    ('た', 'だ'),
    ('ち', 'ぢ'),
    ('つ', 'づ'),
    ('て', 'で'),
    ('と', 'ど'),
    ('は', 'ば'),
    ('ひ', 'び'),
    ('ふ', 'ぶ'),
    ('へ', 'べ'),
    ('ほ', 'ぼ'),
    ('ウ', 'ヴ'),
    ('カ', 'ガ'),
    ('キ', 'ギ'),
    ('ク', 'グ'),
    ('ケ', 'ゲ'),
    ('コ', 'ゴ'),
    ('サ', 'ザ'),
    ('シ', 'ジ'),
    ('ス', 'ズ'),
    ('セ', 'ゼ'),
    ('ソ', 'ゾ'),
    ('タ', 'ダ'),
    ('チ', 'ヂ'),
    ('ツ', 'ヅ'),
    ('テ', 'デ'),
    ('ト', 'ド'),
    ('ハ', 'バ'),
    ('ヒ', 'ビ'),
    ('フ', 'ブ'),
    ('ヘ', 'ベ'),
    ('ホ', 'ボ'),
];

static HANDAKUTEN: &[(char, char)] = &[
    ('は', 'ぱ'),
    ('ひ', 'ぴ'),
    ('ふ', 'ぷ'),
    ('へ', 'ぺ'),
    ('ほ', 'ぽ'),
    ('ハ', 'パ'),
    ('ヒ', 'ピ'),
    ('フ', 'プ'),
    ('ヘ', 'ペ'),
    ('ホ', 'ポ'),
];

/// Full-width forms of U+FF61..=U+FF9F, indexed by `c - U+FF61`.
static HALF_TO_WIDE: [char; 63] = [
    '。', '「', '」', '、', '・', 'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン', '゛', '゜',
];

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table.iter().find(|&&(k, _)| k == c).map(|&(_, v)| v)
}

/// Voiced form of `c` (か → が), or `None` if `c` has no dakuten form.
pub fn combine_dakuten(c: char) -> Option<char> {
    lookup(DAKUTEN, c)
}

/// Semi-voiced form of `c` (は → ぱ), or `None` outside the は row.
pub fn combine_handakuten(c: char) -> Option<char> {
    lookup(HANDAKUTEN, c)
}

/// Combine `base` with `mark` using the matching table.
pub fn combine_voicing(base: char, mark: VoicingMark) -> Option<char> {
    match mark {
        VoicingMark::Dakuten => combine_dakuten(base),
        VoicingMark::Handakuten => combine_handakuten(base),
    }
}

fn widen_half(c: char) -> char {
    if is_half_katakana(c) {
        HALF_TO_WIDE[(c as u32 - 0xFF61) as usize]
    } else {
        c
    }
}

/// Widen half-width katakana to full-width katakana.
///
/// A half-width voicing mark following a character with a table entry is
/// folded into it (ｶﾞ → ガ); otherwise the mark is widened on its own.
pub fn widen_half_katakana(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if let (Some(mark), Some(prev)) = (half_voicing_mark(c), out.chars().last()) {
            if let Some(voiced) = combine_voicing(prev, mark) {
                out.pop();
                out.push(voiced);
                continue;
            }
        }
        out.push(widen_half(c));
    }
    out
}

fn half_voicing_mark(c: char) -> Option<VoicingMark> {
    match c {
        '\u{FF9E}' => Some(VoicingMark::Dakuten),
        '\u{FF9F}' => Some(VoicingMark::Handakuten),
        _ => None,
    }
}

/// Convert katakana (full- or half-width) to full-width hiragana.
/// Characters outside the katakana ァ..ヶ range (ー, kanji, ASCII) pass through.
pub fn to_wide_hiragana(s: &str) -> String {
    widen_half_katakana(s)
        .chars()
        .map(|c| {
            if ('ァ'..='ヶ').contains(&c) {
                char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert hiragana (and half-width katakana) to full-width katakana.
/// Characters outside the hiragana ぁ..ゖ range pass through.
pub fn to_wide_katakana(s: &str) -> String {
    widen_half_katakana(s)
        .chars()
        .map(|c| {
            if ('ぁ'..='ゖ').contains(&c) {
                char::from_u32(c as u32 + KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
