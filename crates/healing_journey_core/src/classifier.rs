//! crates/healing_journey_core/src/classifier.rs
//!
//! Maps a free-text complaint to a therapy category with a weighted keyword
//! heuristic. Pure and deterministic: no state, no I/O.
//!
//! Matching is by plain substring on the lowercased input, so a short keyword
//! can hit inside an unrelated word ("vai" inside "available"). Longer
//! keywords weigh more to soften that, but the behaviour is kept as is.

use std::collections::BTreeSet;
use tracing::debug;

use crate::domain::{CategoryKey, ClassificationResult, Language};

struct KeywordGroup {
    key: CategoryKey,
    keywords: &'static [&'static str],
}

/// Declaration order is the tie-break order.
const KEYWORD_GROUPS: [KeywordGroup; 4] = [
    KeywordGroup {
        key: CategoryKey::EnergyReset,
        keywords: &[
            "pain", "ache", "back", "neck", "shoulder", "muscle", "stiff", "sore", "joint",
            "fatigue", "đau", "nhức", "vai", "gáy", "lưng", "cổ", "cứng cơ", "mỏi cơ",
            "xương khớp",
        ],
    },
    KeywordGroup {
        key: CategoryKey::JetlagRecovery,
        keywords: &[
            "jetlag", "jet lag", "sleep", "insomnia", "tired", "exhausted", "flight", "travel",
            "time zone", "groggy", "mất ngủ", "khó ngủ", "ngủ", "mệt mỏi", "mệt",
            "lệch múi giờ", "chuyến bay",
        ],
    },
    KeywordGroup {
        key: CategoryKey::SilentHealing,
        keywords: &[
            "stress", "tension", "anxiety", "anxious", "burnout", "burned out", "overwhelm",
            "quiet", "silence", "noise", "mental", "heavy", "căng thẳng", "áp lực", "lo âu",
            "tĩnh lặng", "yên tĩnh", "kiệt sức", "nặng nề",
        ],
    },
    KeywordGroup {
        key: CategoryKey::CoupleHealing,
        keywords: &[
            "couple", "romantic", "partner", "together", "anniversary", "honeymoon", "wife",
            "husband", "love", "cặp đôi", "lãng mạn", "người yêu", "vợ chồng", "kỷ niệm",
            "hẹn hò",
        ],
    },
];

/// Keywords longer than three characters count double.
pub fn keyword_weight(keyword: &str) -> u32 {
    if keyword.chars().count() > 3 {
        2
    } else {
        1
    }
}

/// Classifies a complaint.
///
/// Keyword groups cover both languages, so `lang` does not change the result;
/// it is only recorded for tracing. Empty or whitespace-only input, and input
/// that hits no keyword, resolve to [`CategoryKey::Default`] with score 0.
pub fn classify(text: &str, lang: Language) -> ClassificationResult {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return ClassificationResult::unmatched();
    }

    let mut best: Option<ClassificationResult> = None;
    for group in &KEYWORD_GROUPS {
        let (score, matched) = score_group(&normalized, group.keywords);
        if score == 0 {
            continue;
        }
        // Strictly greater: the earlier group keeps a tie.
        if best.as_ref().map_or(true, |current| score > current.score) {
            best = Some(ClassificationResult {
                key: group.key,
                score,
                matched,
            });
        }
    }

    let result = best.unwrap_or_else(ClassificationResult::unmatched);
    debug!(
        lang = %lang,
        key = %result.key,
        score = result.score,
        "Classified condition."
    );
    result
}

fn score_group(normalized: &str, keywords: &[&str]) -> (u32, BTreeSet<String>) {
    let mut matched = BTreeSet::new();
    let mut score = 0;
    for keyword in keywords {
        if normalized.contains(keyword) && matched.insert(keyword.to_string()) {
            score += keyword_weight(keyword);
        }
    }
    (score, matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::LocalizationStore;

    #[test]
    fn back_and_neck_pain_is_an_energy_reset() {
        let result = classify("I have pain in my back and neck", Language::En);
        assert_eq!(result.key, CategoryKey::EnergyReset);
        assert!(result.score >= 4);
        for keyword in ["pain", "back", "neck"] {
            assert!(result.matched.contains(keyword), "missing {keyword}");
        }
    }

    #[test]
    fn vietnamese_insomnia_is_jetlag_recovery() {
        let result = classify("tôi mất ngủ và mệt mỏi", Language::Vi);
        assert_eq!(result.key, CategoryKey::JetlagRecovery);
        assert!(result.matched.contains("mất ngủ"));
    }

    #[test]
    fn romantic_trip_is_couple_healing() {
        let result = classify("let's book a romantic couple trip", Language::En);
        assert_eq!(result.key, CategoryKey::CoupleHealing);
        assert_eq!(result.score, 4);
    }

    #[test]
    fn gibberish_falls_back_to_default() {
        let result = classify("xyz completely unrelated gibberish", Language::En);
        assert_eq!(result, ClassificationResult::unmatched());
        assert!(result.is_default());
    }

    #[test]
    fn blank_input_is_default_without_error() {
        for text in ["", "   ", "\n\t"] {
            let result = classify(text, Language::En);
            assert_eq!(result.key, CategoryKey::Default);
            assert_eq!(result.score, 0);
            assert!(result.matched.is_empty());
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "Stressed out after a long flight with my partner";
        let first = classify(text, Language::En);
        for _ in 0..10 {
            assert_eq!(classify(text, Language::En), first);
        }
        assert_eq!(classify(text, Language::Vi), first);
    }

    #[test]
    fn repeated_keywords_count_once() {
        let once = classify("pain", Language::En);
        let thrice = classify("pain pain PAIN", Language::En);
        assert_eq!(once.score, 2);
        assert_eq!(thrice, once);
    }

    #[test]
    fn short_keywords_weigh_less() {
        assert_eq!(keyword_weight("cổ"), 1);
        assert_eq!(keyword_weight("đau"), 1);
        assert_eq!(keyword_weight("lưng"), 2);
        assert_eq!(keyword_weight("neck"), 2);
    }

    #[test]
    fn appending_keywords_never_lowers_the_score() {
        let mut text = String::from("my");
        let mut previous = 0;
        for keyword in ["neck", "shoulder", "muscle", "stiff", "joint"] {
            text.push(' ');
            text.push_str(keyword);
            let score = classify(&text, Language::En).score;
            assert!(score >= previous);
            previous = score;
        }
        assert_eq!(previous, 10);
    }

    #[test]
    fn ties_go_to_the_earlier_group() {
        // "sore" (energy, 2) against "tired" (jetlag, 2).
        let result = classify("sore and tired", Language::En);
        assert_eq!(result.key, CategoryKey::EnergyReset);
        assert_eq!(result.score, 2);
    }

    #[test]
    fn matched_only_lists_the_winning_group() {
        let result = classify("neck pain and a little stress", Language::En);
        assert_eq!(result.key, CategoryKey::EnergyReset);
        assert!(!result.matched.contains("stress"));
    }

    #[test]
    fn substring_hits_inside_words_are_kept() {
        let result = classify("is a table available", Language::En);
        assert_eq!(result.key, CategoryKey::EnergyReset);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn quick_picks_land_in_a_real_category() {
        let store = LocalizationStore::new();
        for lang in Language::ALL {
            for pick in &store.get(lang).quick_picks {
                let text = pick.text.replacen('?', "", 1);
                assert!(
                    !classify(&text, lang).is_default(),
                    "quick-pick '{}' classified as default",
                    pick.text
                );
            }
        }
    }
}
