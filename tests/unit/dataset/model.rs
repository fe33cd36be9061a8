use super::*;

fn fixture() -> serde_json::Value {
    serde_json::json!({
        "date": "2026-01-31",
        "displayDate": "31 Jan 2026",
        "bottomWord": "",
        "stories": [
            {
                "headline": "Storm hits coast",
                "description": "Heavy rain",
                "intensity": 88,
                "color": "#ff2d55",
                "url": "https://example.org/a",
                "mainLocation": { "name": "Lisbon", "lat": 38.72, "lng": -9.14 }
            },
            {
                "headline": "Markets rally",
                "description": "Stocks up",
                "intensity": 55,
                "color": "#34c759",
                "url": "https://example.org/b",
                "imageUrl": "https://example.org/b.jpg"
            }
        ]
    })
}

#[test]
fn parses_camel_case_payload() {
    let ds = PosterDataset::from_json_str(&fixture().to_string()).unwrap();
    assert_eq!(ds.display_date, "31 Jan 2026");
    assert_eq!(ds.stories.len(), 2);
    let loc = ds.stories[0].main_location.as_ref().unwrap();
    assert_eq!(loc.name, "Lisbon");
    assert!(ds.stories[1].main_location.is_none());
    assert_eq!(
        ds.stories[1].image_url.as_deref(),
        Some("https://example.org/b.jpg")
    );
    assert_eq!(ds.seed().raw(), 20_260_131);
}

#[test]
fn rejects_malformed_payloads() {
    assert!(PosterDataset::from_json_str("{").is_err());
    assert!(PosterDataset::from_json_str(r#"{"date": ""}"#).is_err());
}

#[test]
fn active_stories_caps_at_three() {
    let mut ds = PosterDataset::from_json_str(&fixture().to_string()).unwrap();
    let extra = ds.stories[0].clone();
    ds.stories.extend([extra.clone(), extra.clone(), extra]);
    assert_eq!(ds.active_stories().len(), MAX_STORIES);
}

#[test]
fn sidebar_label_formats_dates() {
    let ds = PosterDataset::empty("2026-01-31");
    assert_eq!(ds.sidebar_label("2026-01-31"), "TODAY");
    assert_eq!(ds.sidebar_label("2026-02-01"), "31 JAN 2026");
    assert_eq!(PosterDataset::empty("2026-09-04").sidebar_label("x"), "4 SEPT 2026");
    assert_eq!(PosterDataset::empty("soon").sidebar_label("x"), "SOON");
}

#[test]
fn today_is_a_parseable_date() {
    let today = today_utc();
    assert_eq!(today.len(), 10, "{today}");
    assert!(parse_ymd(&today).is_some(), "{today}");
}

#[test]
fn rejects_impossible_dates() {
    assert!(parse_ymd("2026-02-30").is_none());
    assert!(parse_ymd("2024-02-29").is_some());
    assert!(parse_ymd("2025-02-29").is_none());
    assert!(parse_ymd("2026-13-01").is_none());
    assert!(parse_ymd("2026-01-311").is_none());
    assert!(parse_ymd("").is_none());
}

#[test]
fn parses_dates_with_time_suffix() {
    let d = parse_ymd(" 2026-01-31T10:00:00Z ").unwrap();
    assert_eq!((d.year(), d.month(), d.day()), (2026, 1, 31));
}

#[test]
fn display_date_uses_short_months_and_sept() {
    assert_eq!(display_date("2024-02-29"), "29 FEB 2024");
    assert_eq!(display_date("2025-09-03"), "3 SEPT 2025");
    assert_eq!(display_date("2025-12-25"), "25 DEC 2025");
    assert_eq!(display_date("  not a date "), "not a date");
}
