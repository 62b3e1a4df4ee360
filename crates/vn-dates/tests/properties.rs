use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use vn_dates::day::{day_label, shift_days};
use vn_dates::month::shift_month;
use vn_dates::rules::{DAY_RULES, IDIOMS};
use vn_dates::week::week_range;
use vn_dates::{Normalizer, ReferenceInstant, Stage, WeekStartDay};

const VOCABULARY: &[&str] = &[
    "ngày mai", "mai", "hôm nay", "hôm qua", "ngày kia", "ngày mốt", "lúc 10", "10h", "9:30",
    "giờ", "sáng họp", "tối bay", "trưa ăn", "tuần sau", "tuần tới", "tuần trước", "tháng sau",
    "tháng tới", "tháng trước", "mai mốt", "khi nào", "họp", "với", "anh Tuấn", "trời", "đẹp",
    "ngày", "tuần", "tháng", "2025", ",", "3 người", "Ngày Mai", "HÔM NAY",
];

const FILLER: &[&str] = &[
    "họp", "với", "anh", "Tuấn", "trời", "đẹp", "quá", "dự", "án", "ERP", "cà", "phê", ",", "3",
];

fn reference() -> impl Strategy<Value = ReferenceInstant> {
    (1950i32..2150, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        ReferenceInstant::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    })
}

fn sentence(words: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(words), 0..12).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in sentence(VOCABULARY), r in reference()) {
        let n = Normalizer::new().unwrap();
        let once = n.normalize(&text, &r);
        prop_assert_eq!(n.normalize(&once, &r), once);
    }

    #[test]
    fn idiom_suppresses_day_rules(
        before in sentence(VOCABULARY),
        idiom in prop::sample::select(IDIOMS),
        after in sentence(VOCABULARY),
        r in reference(),
    ) {
        let text = format!("{before} {idiom} {after}");
        let report = Normalizer::new().unwrap().normalize_with_report(&text, &r);
        prop_assert!(report.idiom.is_some());
        prop_assert!(report.substitutions.iter().all(|s| s.stage != Stage::Day));
    }

    #[test]
    fn text_without_phrases_is_unchanged(text in sentence(FILLER), r in reference()) {
        prop_assert_eq!(Normalizer::new().unwrap().normalize(&text, &r), text);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,64}", r in reference()) {
        let _ = Normalizer::new().unwrap().normalize(&text, &r);
    }

    #[test]
    fn bare_day_phrase_is_gated(
        index in 0..DAY_RULES.len(),
        tail in sentence(FILLER),
        r in reference(),
    ) {
        let n = Normalizer::new().unwrap();
        let rule = DAY_RULES[index];

        let bare = format!("{} {}", rule.phrase, tail);
        prop_assert_eq!(n.normalize(&bare, &r), bare.clone());

        let expected = day_label(shift_days(r.date(), rule.offset).unwrap());
        let timed = format!("{} lúc 10 {}", rule.phrase, tail);
        prop_assert_eq!(n.normalize(&timed, &r), format!("{} lúc 10 {}", expected, tail));

        let reversed = format!("lúc 10 {} {}", rule.phrase, tail);
        prop_assert_eq!(n.normalize(&reversed, &r), format!("lúc 10 {} {}", expected, tail));

        let day_part = format!("{} tối bay {}", tail, rule.phrase);
        prop_assert_eq!(n.normalize(&day_part, &r), format!("{} tối bay {}", tail, expected));
    }

    #[test]
    fn week_range_is_a_calendar_week(r in reference(), offset in -3i32..=3) {
        let date = r.date();
        let (start, end) = week_range(date, offset, WeekStartDay::Monday).unwrap();
        let this_monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
        prop_assert_eq!(start.weekday(), Weekday::Mon);
        prop_assert_eq!(end - start, Duration::days(6));
        prop_assert_eq!(start - this_monday, Duration::weeks(offset as i64));
    }

    #[test]
    fn month_shift_stays_in_range(
        year in 1900i32..2100,
        month in 1u32..=12,
        offset in -40i32..=40,
    ) {
        let (y, m) = shift_month(year, month, offset);
        prop_assert!((1..=12).contains(&m));
        prop_assert_eq!(
            y * 12 + m as i32 - 1,
            year * 12 + month as i32 - 1 + offset
        );
    }
}

#[test]
fn tomorrow_rolls_over_month_end() {
    let n = Normalizer::new().unwrap();
    let r = ReferenceInstant::from_date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    assert_eq!(n.normalize("ngày mai 10h", &r), "ngày 01/04/2025 10h");
}

#[test]
fn next_month_in_december_rolls_the_year() {
    let n = Normalizer::new().unwrap();
    let r = ReferenceInstant::from_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    assert_eq!(n.normalize("tháng sau", &r), "tháng 1/2026");
}

#[test]
fn next_week_from_wednesday_starts_seven_days_after_this_monday() {
    let n = Normalizer::new().unwrap();
    // Wed Jan 15 2025, this Monday Jan 13
    let r = ReferenceInstant::from_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    assert_eq!(n.normalize("tuần sau", &r), "tuần 20/01-26/01/2025");
}

#[test]
fn normalizer_shared_across_threads() {
    let n = std::sync::Arc::new(Normalizer::new().unwrap());
    let handles: Vec<_> = (1..=4u32)
        .map(|day| {
            let n = n.clone();
            std::thread::spawn(move || {
                let r = ReferenceInstant::from_date(NaiveDate::from_ymd_opt(2025, 1, day).unwrap());
                n.normalize("hôm nay 10h", &r)
            })
        })
        .collect();
    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        outputs,
        vec![
            "ngày 01/01/2025 10h",
            "ngày 02/01/2025 10h",
            "ngày 03/01/2025 10h",
            "ngày 04/01/2025 10h",
        ]
    );
}
