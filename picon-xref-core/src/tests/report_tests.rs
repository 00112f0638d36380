use super::*;
use crate::catalog::{RawXmlEntry, SourceTag};
use crate::reconcile::{partition, reconcile};

fn png_catalog() -> Catalog {
    Catalog::from_png_paths([
        "logos/E2LIST/13.0E/1_0_1_27_791A_217C_EEEE0000_0_0_0.png",
        "logos/E2LIST/19.2E/1_0_1_27_791A_217C_EEEE0000_0_0_0.png",
        "logos/E2LIST/19.2E/1_0_99_99_99_99_FFFF0000_0_0_0.png",
        "logos/E2LIST/13.0E/1_0_1_10_255_4096_EEEE0000_0_0_0.png",
        "logos/E2LIST/0.8W/1_0_1_5000_791A_217C_EEEE0000_0_0_0.png",
    ])
}

fn xml_catalog() -> Catalog {
    Catalog::from_xml_entries([
        RawXmlEntry::new("DonnaTV.it", "1:0:1:27:791A:217C:EEEE0000:0:0:0:")
            .with_before("13.0E")
            .with_after("Donna TV"),
        RawXmlEntry::new("Hex.it", "1:0:1:A:FF:1000:EEEE0000:0:0:0:")
            .with_before("13.0E")
            .with_after("Hex Channel"),
        RawXmlEntry::new("Orphan.it", "1:0:1:1:2:3:EEEE0000:0:0:0:").with_before("13.0E"),
    ])
}

fn build() -> Report {
    let png = png_catalog();
    let xml = xml_catalog();
    let parts = partition(&png, &xml);
    build_report(&parts, &png, &xml, &MatchOptions::default(), &[])
}

#[test]
fn test_mapping_line_unions_satellites() {
    let report = build();
    assert_eq!(
        report.lines.mapping,
        vec!["1_0_1_27_791A_217C_EEEE0000_0_0_0 - Donna TV - 13.0E|19.2E".to_string()]
    );
}

#[test]
fn test_png_only_unknown_line() {
    let report = build();
    assert!(report
        .lines
        .png_only
        .contains(&"1_0_99_99_99_99_FFFF0000_0_0_0 - UNKN - 19.2E".to_string()));
    let key = ServiceKey::from_src("1_0_99_99_99_99_FFFF0000_0_0_0").unwrap();
    assert_eq!(report.resolutions[&key], PngOnlyResolution::Unknown);
}

#[test]
fn test_png_only_variant_line() {
    let report = build();
    assert!(report.lines.png_only.contains(
        &"1_0_1_10_255_4096_EEEE0000_0_0_0 - Hex Channel [= 1_0_1_A_FF_1000_EEEE0000_0_0_0] - 13.0E"
            .to_string()
    ));
    assert_eq!(report.stats.variant_matches, 1);
}

#[test]
fn test_png_only_suggestion_line() {
    let report = build();
    // namespace, original network id and service id agree with Donna TV: 3 + 2 + 1
    assert!(report.lines.png_only.contains(
        &"1_0_1_5000_791A_217C_EEEE0000_0_0_0 - Donna TV? [~ 1_0_1_27_791A_217C_EEEE0000_0_0_0, score 6] - 0.8W"
            .to_string()
    ));
    assert_eq!(report.stats.suggested, 1);
}

#[test]
fn test_suggestion_below_threshold_is_unknown() {
    let png = Catalog::from_png_paths(["logos/13.0E/1_0_7_7_791A_7_EEEE0000_0_0_0.png"]);
    let xml = xml_catalog();
    let key = png.keys().next().unwrap().clone();

    // only the original network id matches Donna TV: score 2
    let resolution = resolve_png_only(&key, &xml, &MatchOptions::default());
    assert_eq!(resolution, PngOnlyResolution::Unknown);

    let lenient = MatchOptions::new().report_threshold(2);
    assert!(matches!(
        resolve_png_only(&key, &xml, &lenient),
        PngOnlyResolution::Suggested(ref m) if m.score == 2
    ));
}

#[test]
fn test_xml_only_line() {
    let report = build();
    assert_eq!(
        report.lines.xml_only,
        vec![
            "1_0_1_1_2_3_EEEE0000_0_0_0 - Orphan.it - 13.0E".to_string(),
            // the decimal-named logo does not take this entry out of xml_only
            "1_0_1_A_FF_1000_EEEE0000_0_0_0 - Hex Channel - 13.0E".to_string(),
        ]
    );
}

#[test]
fn test_stats_and_summary() {
    let report = build();
    let stats = &report.stats;
    assert_eq!(stats.png_keys, 4);
    assert_eq!(stats.xml_keys, 3);
    assert_eq!(stats.both, 1);
    assert_eq!(stats.png_only, 3);
    assert_eq!(stats.xml_only, 2);
    assert!((stats.coverage_percent() - 100.0 / 3.0).abs() < 1e-9);
    assert!(report.lines.summary.contains(&"In both: 1".to_string()));
    assert!(report.lines.summary.contains(&"XML coverage: 33.3%".to_string()));
}

#[test]
fn test_summary_lists_notices() {
    let png = Catalog::from_png_paths(Vec::<&str>::new());
    let xml = Catalog::from_xml_entries(Vec::<RawXmlEntry>::new());
    let result = reconcile(&png, &xml, &MatchOptions::default());
    assert_eq!(result.notices.len(), 2);
    assert!(result
        .report
        .lines
        .summary
        .contains(&"Notice: PNG source is empty, nothing to reconcile".to_string()));
    assert_eq!(result.report.stats.coverage_percent(), 0.0);
    assert!(result.report.lines.mapping.is_empty());
}

#[test]
fn test_merged_record_prefers_channel_name() {
    let png = png_catalog();
    let xml = xml_catalog();
    let key = ServiceKey::from_xml_ref("1:0:1:27:791A:217C:EEEE0000:0:0:0:").unwrap();
    let merged = merged_record(&key, &png, &xml).unwrap();
    assert_eq!(merged.display_name, "Donna TV");
    assert_eq!(merged.source, SourceTag::Xml);
}

#[test]
fn test_mapping_uses_channel_id_when_entry_has_no_name() {
    let png = Catalog::from_png_paths(["logos/E2LIST/13.0E/1_0_1_27_791A_217C_EEEE0000_0_0_0.png"]);
    let xml = Catalog::from_xml_entries([
        RawXmlEntry::new("DonnaTV.it", "1:0:1:27:791A:217C:EEEE0000:0:0:0:").with_before("13.0E")
    ]);
    let parts = partition(&png, &xml);
    let report = build_report(&parts, &png, &xml, &MatchOptions::default(), &[]);
    assert_eq!(
        report.lines.mapping,
        vec!["1_0_1_27_791A_217C_EEEE0000_0_0_0 - DonnaTV.it - 13.0E".to_string()]
    );
}

#[test]
fn test_merged_record_takes_logo_satellites_only() {
    let png = Catalog::from_png_paths(["logos/19.2E/1_0_5_5_5_5_AAAA0000_0_0_0.png"]);
    let xml = Catalog::from_xml_entries([
        RawXmlEntry::new("X.uk", "1:0:5:5:5:5:AAAA0000:0:0:0:").with_section("13.0E")
    ]);
    let key = ServiceKey::from_src("1_0_5_5_5_5_AAAA0000_0_0_0").unwrap();
    let merged = merged_record(&key, &png, &xml).unwrap();
    assert_eq!(merged.display_name, "X.uk");
    assert!(merged.generic_name);
    assert_eq!(merged.satellites_label(), "13.0E|19.2E");
}

#[test]
fn test_write_to_memory_sink() {
    let report = build();
    let mut sink: BTreeMap<String, Vec<String>> = BTreeMap::new();
    report.lines.write_to(&mut sink).unwrap();
    let names: Vec<&str> = sink.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["mapping", "png_only", "summary", "xml_only"]);
    assert_eq!(sink["mapping"], report.lines.mapping);
}
