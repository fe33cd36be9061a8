use super::*;

fn entry(date: &str) -> ArchiveEntry {
    ArchiveEntry {
        date: date.to_string(),
        display_date: String::new(),
        file: archive_file_name(date),
    }
}

#[test]
fn index_is_newest_first_and_deduplicated() {
    let idx = ArchiveIndex::from_entries([
        entry("2026-01-30"),
        entry("2026-02-01"),
        entry("2026-01-30"),
        entry("2026-01-31"),
    ]);
    let dates: Vec<_> = idx.entries().iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates, ["2026-02-01", "2026-01-31", "2026-01-30"]);
}

#[test]
fn insert_reports_duplicates() {
    let mut idx = ArchiveIndex::default();
    assert!(idx.insert(entry("2026-01-31")));
    assert!(!idx.insert(entry("2026-01-31")));
    assert_eq!(idx.len(), 1);
}

#[test]
fn index_serializes_as_plain_array() {
    let idx = ArchiveIndex::from_entries([entry("2026-01-31")]);
    let v = serde_json::to_value(&idx).unwrap();
    assert_eq!(
        v,
        serde_json::json!([{ "date": "2026-01-31", "displayDate": "", "file": "poster-2026-01-31.json" }])
    );
}

#[test]
fn store_paths_follow_mirror_layout() {
    let store = ArchiveStore::new("/data");
    assert_eq!(store.latest_path(), Path::new("/data/latest.json"));
    assert_eq!(store.index_path(), Path::new("/data/archive/index.json"));
    assert_eq!(
        store.dataset_path("2026-01-31"),
        Path::new("/data/archive/poster-2026-01-31.json")
    );
}
