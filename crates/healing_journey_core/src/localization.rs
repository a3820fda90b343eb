//! crates/healing_journey_core/src/localization.rs
//!
//! The localization store: one complete bundle of display strings, therapy
//! catalog, healing steps and quick-picks per supported language.
//! Built once at startup and only ever read afterwards.

use serde::Serialize;

use crate::catalog::TherapyCatalog;
use crate::domain::{
    CategoryKey, HealingStep, Intensity, Language, QuickPick, StepKind, TherapyRecord,
};

const URL_ENERGY_RESET: &str =
    "https://homehealinghub.com.vn/product/energy-reset-deep-recovery-thai-therapy/";
const URL_JETLAG_RECOVERY: &str =
    "https://homehealinghub.com.vn/product/jetlag-recovery-wake-up-refreshed-wherever-you-land/";
const URL_SILENT_HEALING: &str =
    "https://homehealinghub.com.vn/product/silent-healing-total-silence-sound-nature-therapy/";
const URL_COUPLE_HEALING: &str = "https://homehealinghub.com.vn/product/couple-healing-romantic-connection-therapy-639hz-heart-frequency-experience/";
const URL_DEFAULT: &str = "https://homehealinghub.com.vn/healing-journeys/";

/// Display copy used by the journey screens. Sent whole to the front end
/// whenever the session starts or the language changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiStrings {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_button: String,
    pub input_placeholder: String,
    pub suggestion_hint: String,
    pub healing_path: String,
    pub reservation_title: String,
    pub label_name: String,
    pub label_phone: String,
    pub label_email: String,
    pub intensity_mild: String,
    pub intensity_moderate: String,
    pub intensity_severe: String,
    pub submit_button: String,
    pub whispers: [String; 3],
    /// Contains a `{name}` placeholder.
    pub whisper_dedication: String,
    pub badge_empathy: String,
    pub badge_result: String,
    pub badge_step: String,
    pub condition_prefix: String,
    pub rec_welcome: String,
    pub rec_subtitle: String,
    pub rec_cta: String,
    pub rec_intensity: String,
    pub rec_duration: String,
    pub rec_contact: String,
    pub contact_line: String,
    pub auto_playing: String,
    pub footer_hint: String,
    pub prev_page: String,
    pub next_page: String,
    pub mute_label: String,
    pub play_label: String,
}

impl UiStrings {
    pub fn intensity_label(&self, intensity: Intensity) -> &str {
        match intensity {
            Intensity::Mild => &self.intensity_mild,
            Intensity::Moderate => &self.intensity_moderate,
            Intensity::Severe => &self.intensity_severe,
        }
    }

    pub fn dedication(&self, name: &str) -> String {
        self.whisper_dedication.replace("{name}", name)
    }
}

/// Everything the journey needs to render in one language.
#[derive(Debug, Clone)]
pub struct LocaleBundle {
    pub language: Language,
    pub strings: UiStrings,
    pub therapies: TherapyCatalog,
    pub steps: Vec<HealingStep>,
    pub quick_picks: Vec<QuickPick>,
}

impl LocaleBundle {
    pub fn therapy(&self, key: CategoryKey) -> &TherapyRecord {
        self.therapies.get(key)
    }
}

/// All bundles, keyed by language.
#[derive(Debug, Clone)]
pub struct LocalizationStore {
    en: LocaleBundle,
    vi: LocaleBundle,
}

impl Default for LocalizationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalizationStore {
    pub fn new() -> Self {
        Self {
            en: english(),
            vi: vietnamese(),
        }
    }

    pub fn get(&self, lang: Language) -> &LocaleBundle {
        match lang {
            Language::En => &self.en,
            Language::Vi => &self.vi,
        }
    }
}

//=========================================================================================
// Bundle Builders
//=========================================================================================

fn therapy(name: &str, description: &str, duration: &str, url: &str) -> TherapyRecord {
    TherapyRecord {
        name: name.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        booking_url: url.to_string(),
    }
}

fn step(
    kind: StepKind,
    title: &str,
    description: &str,
    detail: &str,
    duration: Option<&str>,
) -> HealingStep {
    HealingStep {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        detail: detail.to_string(),
        duration: duration.map(str::to_string),
    }
}

fn quick_pick(id: &str, text: &str, keywords: &[&str]) -> QuickPick {
    QuickPick {
        id: id.to_string(),
        text: text.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn english() -> LocaleBundle {
    let strings = UiStrings {
        hero_title: "Personalized Healing Consultation".into(),
        hero_subtitle: "Take a deep breath and share how you feel right now. Click the button below to enter your private sanctuary.".into(),
        hero_button: "Personal Healing Consultation".into(),
        input_placeholder: "Describe your current condition".into(),
        suggestion_hint: "↵ Press Enter or Tap".into(),
        healing_path: "Healing Path".into(),
        reservation_title: "Reservation Details".into(),
        label_name: "Full Name".into(),
        label_phone: "Phone Number".into(),
        label_email: "Email (Optional)".into(),
        intensity_mild: "Intensity: Mild (Occasional pain)".into(),
        intensity_moderate: "Intensity: Moderate (Affects daily life)".into(),
        intensity_severe: "Intensity: Severe (Constant ache)".into(),
        submit_button: "Complete & Preview Plan".into(),
        whispers: [
            "Relax your shoulders...".into(),
            "Take a deep breath...".into(),
            "Your personalized healing path is ready.".into(),
        ],
        whisper_dedication: "— for {name} —".into(),
        badge_empathy: "Empathy".into(),
        badge_result: "Result".into(),
        badge_step: "Step".into(),
        condition_prefix: "Because you are feeling".into(),
        rec_welcome: "Welcome".into(),
        rec_subtitle: "Based on your condition, your ideal healing journey is:".into(),
        rec_cta: "Treat yourself to this experience".into(),
        rec_intensity: "Intensity".into(),
        rec_duration: "Duration".into(),
        rec_contact: "Contact".into(),
        contact_line: "Vietnam: 0981073280".into(),
        auto_playing: "Auto-playing pages...".into(),
        footer_hint: "← → or click to flip pages".into(),
        prev_page: "Previous Page".into(),
        next_page: "Next Page".into(),
        mute_label: "Mute forest sound".into(),
        play_label: "Play forest sound".into(),
    };

    let therapies = TherapyCatalog {
        energy_reset: therapy(
            "Energy Reset: Deep Recovery Thai Therapy",
            "Intensive Thai stretching, herbal hot compresses, and 528Hz healing frequencies to relieve physical fatigue and joint stiffness.",
            "120 mins",
            URL_ENERGY_RESET,
        ),
        jetlag_recovery: therapy(
            "Jetlag Recovery: Wake Up Refreshed",
            "Lymphatic drainage massage, rehydrating oils, and 963Hz Crown Frequency to clear mental fog and restore your natural circadian rhythm.",
            "90 mins",
            URL_JETLAG_RECOVERY,
        ),
        silent_healing: therapy(
            "Silent Healing: Total Silence Therapy",
            "A calming massage in total silence, accompanied by 432Hz nature-aligned soundscapes and grounding oils to cure mental burnout.",
            "90 mins",
            URL_SILENT_HEALING,
        ),
        couple_healing: therapy(
            "Couple Healing: Romantic Connection Therapy",
            "Synchronized dual-massage with 639Hz Heart Frequency, romantic candlelight setup, and love-blend aromatherapy for deeper connection.",
            "120 mins",
            URL_COUPLE_HEALING,
        ),
        default: therapy(
            "Signature Holistic Journey",
            "A bespoke treatment session specifically designed to target your unique physical and emotional state.",
            "135 mins",
            URL_DEFAULT,
        ),
    };

    let steps = vec![
        step(
            StepKind::Empathy,
            "We Understand You",
            "Because you are feeling heavy and stressed...",
            "Your body is sending a signal for care. This is the first step of your healing journey, where we listen and understand.",
            None,
        ),
        step(
            StepKind::Solution,
            "Deep Muscle Release",
            "Step 1: Herbal Essential Oil Therapy",
            "Organic essential oil therapy combined with Swedish massage techniques relaxes deep muscle groups, effectively reducing pain from the first 60 minutes.",
            Some("60 mins"),
        ),
        step(
            StepKind::Solution,
            "Energy Regeneration",
            "Step 2: Hot Stone & Light Therapy",
            "Hot basalt stones placed on acupressure points combined with infrared therapy light activate blood circulation and regenerate new cells.",
            Some("45 mins"),
        ),
        step(
            StepKind::Solution,
            "Mind Balancing",
            "Step 3: Meditation & Aromatherapy",
            "A quiet private room with agarwood scent and Theta brainwave music, guided personal meditation helps the mind shed all pressure.",
            Some("30 mins"),
        ),
        step(
            StepKind::Result,
            "Total Rejuvenation",
            "Result: Body & Mind Harmony",
            "After the journey, you will clearly feel the difference: light shoulders, clear mind, deeper sleep, and spreading positive energy.",
            None,
        ),
    ];

    let quick_picks = vec![
        quick_pick("vai-gay", "Neck & Shoulder Pain?", &["n", "ne", "neck", "shoulder", "pain"]),
        quick_pick("mat-ngu", "Trouble Sleeping?", &["s", "sl", "sleep", "insomnia", "trouble"]),
        quick_pick("stress", "Heavy Stress & Tension?", &["s", "st", "stress", "tension", "heavy"]),
        quick_pick("that-lung", "Lower Back Pain?", &["b", "ba", "back", "lower"]),
    ];

    LocaleBundle {
        language: Language::En,
        strings,
        therapies,
        steps,
        quick_picks,
    }
}

fn vietnamese() -> LocaleBundle {
    let strings = UiStrings {
        hero_title: "Tư Vấn Trị Liệu Cá Nhân Hóa".into(),
        hero_subtitle: "Hãy hít thở thật sâu và chia sẻ cảm nhận của bạn. Nhấn nút bên dưới để bước vào không gian riêng tư.".into(),
        hero_button: "Tư Vấn Trị Liệu Cá Nhân".into(),
        input_placeholder: "Mô tả tình trạng hiện tại của bạn".into(),
        suggestion_hint: "↵ Nhấn Enter hoặc Chạm".into(),
        healing_path: "Lộ Trình Chữa Lành".into(),
        reservation_title: "Thông Tin Đặt Lịch".into(),
        label_name: "Họ và Tên".into(),
        label_phone: "Số Điện Thoại".into(),
        label_email: "Email (Không bắt buộc)".into(),
        intensity_mild: "Mức độ: Nhẹ (Thi thoảng đau)".into(),
        intensity_moderate: "Mức độ: Trung bình (Ảnh hưởng sinh hoạt)".into(),
        intensity_severe: "Mức độ: Nặng (Đau liên tục)".into(),
        submit_button: "Hoàn Tất & Nhận Phác Đồ".into(),
        whispers: [
            "Hãy thả lỏng hai vai của bạn...".into(),
            "Hít một hơi thật sâu...".into(),
            "Lộ trình thư giãn của riêng bạn đã sẵn sàng.".into(),
        ],
        whisper_dedication: "— dành cho {name} —".into(),
        badge_empathy: "Lắng Nghe".into(),
        badge_result: "Kết Quả".into(),
        badge_step: "Bước".into(),
        condition_prefix: "Vì bạn đang cảm thấy".into(),
        rec_welcome: "Xin chào".into(),
        rec_subtitle: "Dựa trên tình trạng của bạn, lộ trình chữa lành lý tưởng là:".into(),
        rec_cta: "Dành tặng bản thân trải nghiệm này".into(),
        rec_intensity: "Mức độ".into(),
        rec_duration: "Thời lượng".into(),
        rec_contact: "Liên hệ".into(),
        contact_line: "Việt Nam: 0981073280".into(),
        auto_playing: "Đang tự động lật trang...".into(),
        footer_hint: "← → hoặc click để lật trang".into(),
        prev_page: "Trang trước".into(),
        next_page: "Trang sau".into(),
        mute_label: "Tắt âm thanh rừng".into(),
        play_label: "Bật âm thanh rừng".into(),
    };

    let therapies = TherapyCatalog {
        energy_reset: therapy(
            "Phục Hồi Năng Lượng: Thai Massage Chuyên Sâu",
            "Kỹ thuật Thai kéo giãn chuyên sâu, chườm thảo mộc nóng và tần số chữa lành 528Hz giúp giải phóng mệt mỏi thể chất.",
            "120 phút",
            URL_ENERGY_RESET,
        ),
        jetlag_recovery: therapy(
            "Phục Hồi Jetlag: Tỉnh Táo Trở Lại",
            "Massage dẫn lưu bạch huyết, tinh dầu dưỡng ẩm và tần số vương miện 963Hz giúp xóa tan sương mù trí tuệ.",
            "90 phút",
            URL_JETLAG_RECOVERY,
        ),
        silent_healing: therapy(
            "Chữa Lành Trong Tĩnh Lặng",
            "Massage trong không gian tĩnh lặng hoàn toàn, cùng âm thanh 432Hz hài hòa thiên nhiên và tinh dầu grounding.",
            "90 phút",
            URL_SILENT_HEALING,
        ),
        couple_healing: therapy(
            "Couple Healing: Trị Liệu Kết Nối Lãng Mạn",
            "Massage đồng bộ cho cặp đôi với tần số trái tim 639Hz, nến thơm lãng mạn và tinh dầu tình yêu cho kết nối sâu sắc hơn.",
            "120 phút",
            URL_COUPLE_HEALING,
        ),
        default: therapy(
            "Hành Trình Toàn Diện Đặc Biệt",
            "Liệu trình trị liệu riêng biệt được thiết kế chuyên biệt cho tình trạng thể chất và cảm xúc của bạn.",
            "135 phút",
            URL_DEFAULT,
        ),
    };

    let steps = vec![
        step(
            StepKind::Empathy,
            "Chúng Tôi Hiểu Bạn",
            "Vì bạn đang cảm thấy nặng nề và căng thẳng...",
            "Cơ thể bạn đang gửi tín hiệu cần được chăm sóc. Đây là bước đầu tiên của hành trình phục hồi, nơi chúng tôi lắng nghe và thấu hiểu.",
            None,
        ),
        step(
            StepKind::Solution,
            "Giải Phóng Cơ Sâu",
            "Bước 1: Trị liệu bằng tinh dầu thảo mộc",
            "Liệu pháp tinh dầu organic kết hợp kỹ thuật massage Thụy Điển giúp thả lỏng các nhóm cơ sâu, giảm đau mỏi hiệu quả từ 60 phút đầu tiên.",
            Some("60 phút"),
        ),
        step(
            StepKind::Solution,
            "Tái Tạo Năng Lượng",
            "Bước 2: Đá nóng & Liệu pháp ánh sáng",
            "Đá bazan nóng đặt lên các huyệt đạo kết hợp ánh sáng trị liệu hồng ngoại, kích hoạt tuần hoàn máu và tái tạo tế bào mới.",
            Some("45 phút"),
        ),
        step(
            StepKind::Solution,
            "Cân Bằng Tâm Trí",
            "Bước 3: Thiền định & Hương trị liệu",
            "Phòng riêng tĩnh lặng với hương trầm và nhạc sóng não Theta, hướng dẫn thiền định cá nhân giúp tâm trí rũ bỏ mọi áp lực.",
            Some("30 phút"),
        ),
        step(
            StepKind::Result,
            "Tái Sinh Toàn Diện",
            "Kết quả: Cơ thể & tâm trí hài hòa",
            "Sau lộ trình, bạn sẽ cảm nhận rõ sự khác biệt: vai gáy nhẹ nhàng, tâm trí sáng suốt, giấc ngủ sâu hơn và năng lượng tích cực lan tỏa.",
            None,
        ),
    ];

    let quick_picks = vec![
        quick_pick("vai-gay", "Đau Cổ Vai Gáy?", &["đ", "đa", "đau", "vai", "gáy", "cổ"]),
        quick_pick("mat-ngu", "Mất Ngủ / Khó Ngủ?", &["m", "mấ", "mất", "ngủ", "khó"]),
        quick_pick("stress", "Căng Thẳng / Stress Nặng?", &["c", "că", "căng", "stress", "nặng"]),
        quick_pick("that-lung", "Đau Thắt Lưng?", &["l", "lư", "lưng", "thắt"]),
    ];

    LocaleBundle {
        language: Language::Vi,
        strings,
        therapies,
        steps,
        quick_picks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundles_are_complete_for_every_language() {
        let store = LocalizationStore::new();
        for lang in Language::ALL {
            let bundle = store.get(lang);
            assert_eq!(bundle.language, lang);
            assert_eq!(bundle.steps.len(), 5);
            assert_eq!(bundle.quick_picks.len(), 4);
            assert_eq!(bundle.steps[0].kind, StepKind::Empathy);
            assert_eq!(bundle.steps[4].kind, StepKind::Result);
            assert!(bundle.strings.whispers.iter().all(|w| !w.is_empty()));
        }
    }

    #[test]
    fn dedication_fills_in_the_name() {
        let store = LocalizationStore::new();
        assert_eq!(store.get(Language::En).strings.dedication("Lan"), "— for Lan —");
        assert_eq!(
            store.get(Language::Vi).strings.dedication("Lan"),
            "— dành cho Lan —"
        );
    }

    #[test]
    fn intensity_labels_follow_the_language() {
        let store = LocalizationStore::new();
        let en = &store.get(Language::En).strings;
        assert!(en.intensity_label(Intensity::Severe).contains("Severe"));
        let vi = &store.get(Language::Vi).strings;
        assert!(vi.intensity_label(Intensity::Mild).contains("Nhẹ"));
    }
}
