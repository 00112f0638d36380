use super::*;

const XML_URL: &str = "https://example.invalid/rytec.channels.xml";

#[test]
fn test_store_then_cached() {
    let dir = tempfile::tempdir().unwrap();
    let cache = SourceCache::at(dir.path());

    assert_eq!(cache.cached("rytec.channels.xml", XML_URL).unwrap(), None);

    let path = cache
        .store("rytec.channels.xml", XML_URL, b"<channels/>")
        .unwrap();
    assert_eq!(path, dir.path().join("sources").join("rytec.channels.xml"));
    assert_eq!(fs::read(&path).unwrap(), b"<channels/>");
    assert_eq!(
        cache.cached("rytec.channels.xml", XML_URL).unwrap(),
        Some(path)
    );
}

#[test]
fn test_cached_rejects_other_url() {
    let dir = tempfile::tempdir().unwrap();
    let cache = SourceCache::at(dir.path());
    cache
        .store("rytec.channels.xml", XML_URL, b"<channels/>")
        .unwrap();
    assert_eq!(
        cache
            .cached("rytec.channels.xml", "https://example.invalid/other.xml")
            .unwrap(),
        None
    );
}

#[test]
fn test_load_or_fetch_uses_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = SourceCache::at(dir.path());
    let stored = cache.store("logos.json", XML_URL, b"{}").unwrap();
    // The URL does not resolve, so this only passes without a download.
    assert_eq!(
        cache.load_or_fetch("logos.json", XML_URL, false).unwrap(),
        stored
    );
}

#[test]
fn test_list_reports_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let cache = SourceCache::at(dir.path());
    cache.store("b.xml", XML_URL, b"12345").unwrap();
    cache.store("a.json", XML_URL, b"{}").unwrap();

    let entries = cache.list().unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.json", "b.xml"]);
    assert_eq!(entries[1].file_size, 5);
    assert!(chrono::DateTime::parse_from_rfc3339(&entries[1].downloaded).is_ok());
}

#[test]
fn test_clear_removes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let cache = SourceCache::at(dir.path());
    cache.store("a.json", XML_URL, b"{}").unwrap();

    let freed = cache.clear().unwrap();
    assert!(freed >= 2);
    assert!(cache.list().unwrap().is_empty());
    assert!(!cache.source_path("a.json").exists());
}

#[test]
fn test_version_mismatch_wipes_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = SourceCache::at(dir.path());
    cache.store("a.json", XML_URL, b"{}").unwrap();

    let stale = r#"{"version": 0, "sources": {"a.json": {"url": "x", "downloaded": "", "file_size": 2}}}"#;
    fs::write(dir.path().join("meta.json"), stale).unwrap();

    assert!(cache.list().unwrap().is_empty());
    assert!(!cache.source_path("a.json").exists());
}
