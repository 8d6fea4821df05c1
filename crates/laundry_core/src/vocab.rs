/// Translated labels for one display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocab {
    pub hello: &'static str,
    /// Shown before the countdown, e.g. "Ends in".
    pub remaining_prefix: &'static str,
    pub available: &'static str,
    pub washer: &'static str,
    pub dryer: &'static str,
    pub washer_dryer: &'static str,
    pub sneaker_washer: &'static str,
    pub sneaker_dryer: &'static str,
    pub shoe: &'static str,
    pub min: &'static str,
    pub calculating: &'static str,
    pub finished: &'static str,
    pub in_use: &'static str,
    pub error: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub vocab: Vocab,
}

pub const DEFAULT_LANGUAGE: &str = "en";

pub static LANGUAGES: [Language; 8] = [
    Language {
        code: "en",
        name: "English",
        flag: "🇺🇸",
        vocab: Vocab {
            hello: "Check Availability",
            remaining_prefix: "Ends in",
            available: "Available",
            washer: "Washer",
            dryer: "Dryer",
            washer_dryer: "Washer/Dryer",
            sneaker_washer: "Shoe Washer",
            sneaker_dryer: "Shoe Dryer",
            shoe: "Shoe Machine",
            min: "min",
            calculating: "Calc...",
            finished: "Finished",
            in_use: "In Use",
            error: "Error",
        },
    },
    Language {
        code: "zh-CN",
        name: "简体中文",
        flag: "🇨🇳",
        vocab: Vocab {
            hello: "检查可用性",
            remaining_prefix: "剩余",
            available: "空闲",
            washer: "洗衣机",
            dryer: "烘干机",
            washer_dryer: "洗烘一体机",
            sneaker_washer: "洗鞋机",
            sneaker_dryer: "烘鞋机",
            shoe: "洗鞋设备",
            min: "分",
            calculating: "计算中...",
            finished: "已完成",
            in_use: "使用中",
            error: "故障",
        },
    },
    Language {
        code: "zh-TW",
        name: "繁體中文",
        flag: "🇹🇼",
        vocab: Vocab {
            hello: "檢查可用性",
            remaining_prefix: "剩餘",
            available: "空閒",
            washer: "洗衣機",
            dryer: "烘乾機",
            washer_dryer: "洗烘一體機",
            sneaker_washer: "洗鞋機",
            sneaker_dryer: "烘鞋機",
            shoe: "洗鞋設備",
            min: "分",
            calculating: "計算中...",
            finished: "已完成",
            in_use: "使用中",
            error: "故障",
        },
    },
    Language {
        code: "ko",
        name: "한국어",
        flag: "🇰🇷",
        vocab: Vocab {
            hello: "사용 가능 여부 확인",
            remaining_prefix: "남은 시간",
            available: "사용 가능",
            washer: "세탁기",
            dryer: "건조기",
            washer_dryer: "세탁건조기",
            sneaker_washer: "운동화 세탁기",
            sneaker_dryer: "운동화 건조기",
            shoe: "운동화 전용",
            min: "분",
            calculating: "계산 중...",
            finished: "종료",
            in_use: "사용 중",
            error: "고장",
        },
    },
    Language {
        code: "ja",
        name: "日本語",
        flag: "🇯🇵",
        vocab: Vocab {
            hello: "空き状況を確認",
            remaining_prefix: "あと",
            available: "空き",
            washer: "洗濯機",
            dryer: "乾燥機",
            washer_dryer: "洗濯乾燥機",
            sneaker_washer: "スニーカー洗濯機",
            sneaker_dryer: "スニーカー乾燥機",
            shoe: "スニーカーランドリー",
            min: "分",
            calculating: "計算中...",
            finished: "運転終了",
            in_use: "運転中",
            error: "故障",
        },
    },
    Language {
        code: "vi",
        name: "Tiếng Việt",
        flag: "🇻🇳",
        vocab: Vocab {
            hello: "Kiểm tra tình trạng",
            remaining_prefix: "Còn",
            available: "Có sẵn",
            washer: "Máy giặt",
            dryer: "Máy sấy",
            washer_dryer: "Máy giặt sấy",
            sneaker_washer: "Máy giặt giày",
            sneaker_dryer: "Máy sấy giày",
            shoe: "Máy giày",
            min: "phút",
            calculating: "Đang tính...",
            finished: "Đã xong",
            in_use: "Đang chạy",
            error: "Lỗi",
        },
    },
    Language {
        code: "th",
        name: "ไทย",
        flag: "🇹🇭",
        vocab: Vocab {
            hello: "ตรวจสอบสถานะ",
            remaining_prefix: "เหลือ",
            available: "ว่าง",
            washer: "เครื่องซักผ้า",
            dryer: "เครื่องอบผ้า",
            washer_dryer: "เครื่องซักอบ",
            sneaker_washer: "เครื่องซักรองเท้า",
            sneaker_dryer: "เครื่องอบรองเท้า",
            shoe: "เครื่องซักรองเท้า",
            min: "นาที",
            calculating: "กำลังคำนวณ...",
            finished: "เสร็จสิ้น",
            in_use: "กำลังทำงาน",
            error: "ข้อผิดพลาด",
        },
    },
    Language {
        code: "fr",
        name: "Français",
        flag: "🇫🇷",
        vocab: Vocab {
            hello: "Vérifier la disponibilité",
            remaining_prefix: "Fin dans",
            available: "Libre",
            washer: "Lave-linge",
            dryer: "Sèche-linge",
            washer_dryer: "Lavant-séchant",
            sneaker_washer: "Lave-chaussures",
            sneaker_dryer: "Sèche-chaussures",
            shoe: "Machine chaussures",
            min: "min",
            calculating: "Calc...",
            finished: "Terminé",
            in_use: "En cours",
            error: "Erreur",
        },
    },
];

/// Exact, case-sensitive code lookup.
pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// English.
pub fn default_language() -> &'static Language {
    find_language(DEFAULT_LANGUAGE).unwrap_or(&LANGUAGES[0])
}

/// Picks a display language for a BCP 47 style locale such as `ja-JP`.
///
/// Exact code first, then the primary subtag. Unlisted Chinese variants go to
/// Traditional for Taiwan and Hong Kong and to Simplified otherwise; anything
/// else falls back to English.
pub fn detect_language(locale: &str) -> &'static Language {
    let locale = locale.trim();
    if let Some(lang) = find_language(locale) {
        return lang;
    }

    let primary = locale.split(&['-', '_'][..]).next().unwrap_or_default();
    if let Some(lang) = find_language(primary) {
        return lang;
    }

    if primary.eq_ignore_ascii_case("zh") {
        let lowered = locale.to_ascii_lowercase();
        let code = if lowered.contains("tw") || lowered.contains("hk") {
            "zh-TW"
        } else {
            "zh-CN"
        };
        if let Some(lang) = find_language(code) {
            return lang;
        }
    }

    default_language()
}
