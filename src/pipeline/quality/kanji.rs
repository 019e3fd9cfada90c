//! Kanji complexity scan for the early-elementary reading level.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::text::is_kanji;

/// Kanji an early-elementary reader is expected to handle. Repeats in the
/// list are harmless; membership is what counts.
const SIMPLE_KANJI: &str = "一二三四五六七八九十百千万円年月日時間分人大小中長出入上下左右前後内外\
    東西南北山川田中村松田川島田中山田木村林森石金水火土空雨雪花草木犬猫鳥魚虫子男女父母兄弟姉妹\
    友達先生学校家店車電話本読書勉強仕事遊食事朝昼夜今明日昨日";

static SIMPLE_SET: LazyLock<HashSet<char>> =
    LazyLock::new(|| SIMPLE_KANJI.chars().filter(|c| !c.is_whitespace()).collect());

/// Whether `c` is a kanji outside the simple allow-list.
pub fn is_complex_kanji(c: char) -> bool {
    is_kanji(c) && !SIMPLE_SET.contains(&c)
}

/// Distinct complex kanji in order of first appearance.
pub fn complex_kanji(text: &str) -> Vec<char> {
    let mut seen = HashSet::new();
    text.chars()
        .filter(|c| is_complex_kanji(*c))
        .filter(|c| seen.insert(*c))
        .collect()
}
