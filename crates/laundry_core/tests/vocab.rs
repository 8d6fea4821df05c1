use laundry_core::{detect_language, find_language, status_line, Machine, MachineKind, MachineStatus, LANGUAGES};
use pretty_assertions::assert_eq;

#[test]
fn locale_detection_follows_fallback_order() {
    let cases = [
        ("zh-CN", "zh-CN"),
        ("zh-TW", "zh-TW"),
        ("zh-HK", "zh-TW"),
        ("zh-Hant-tw", "zh-TW"),
        ("zh", "zh-CN"),
        ("zh-SG", "zh-CN"),
        ("ja-JP", "ja"),
        ("ko-KR", "ko"),
        ("vi", "vi"),
        ("th-TH", "th"),
        ("fr-FR", "fr"),
        ("en-GB", "en"),
        ("de-DE", "en"),
        ("", "en"),
    ];
    for (locale, expected) in cases {
        assert_eq!(detect_language(locale).code, expected, "locale {locale:?}");
    }
}

#[test]
fn every_language_has_complete_vocab() {
    assert_eq!(LANGUAGES.len(), 8);
    for lang in &LANGUAGES {
        let v = &lang.vocab;
        let fields = [
            v.hello,
            v.remaining_prefix,
            v.available,
            v.washer,
            v.dryer,
            v.washer_dryer,
            v.sneaker_washer,
            v.sneaker_dryer,
            v.shoe,
            v.min,
            v.calculating,
            v.finished,
            v.in_use,
            v.error,
        ];
        assert!(fields.iter().all(|f| !f.is_empty()), "{} has gaps", lang.code);
    }
}

#[test]
fn countdown_line_uses_prefix_and_unit() {
    let machine = Machine {
        id: "2".to_string(),
        kind: MachineKind::Dryer,
        status: MachineStatus::InUse,
        remaining_minutes: Some(12),
        capacity: None,
    };
    let en = &find_language("en").unwrap().vocab;
    let fr = &find_language("fr").unwrap().vocab;
    assert_eq!(status_line(&machine, en), "Ends in 12 min");
    assert_eq!(status_line(&machine, fr), "Fin dans 12 min");
}

#[test]
fn lookup_is_case_sensitive() {
    assert!(find_language("zh-cn").is_none());
    assert_eq!(detect_language("zh-cn").code, "zh-CN");
}
