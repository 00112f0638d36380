use picon_xref_core::{
    Catalog, Delimiter, MatchOptions, PngOnlyResolution, RawXmlEntry, ServiceKey, encode,
    keys_equal, partition, reconcile, suggest_matches, to_canonical_fields,
};

fn key(src: &str) -> ServiceKey {
    ServiceKey::from_src(src).unwrap()
}

#[test]
fn logo_and_channel_entry_join() {
    let png = Catalog::from_png_paths(["logos/E2LIST/13.0E/1_0_1_27_791A_217C_EEEE0000_0_0_0.png"]);
    let xml = Catalog::from_xml_entries([RawXmlEntry::new(
        "DonnaTV.it",
        "1:0:1:27:791A:217C:EEEE0000:0:0:0:",
    )
    .with_before("13.0E")
    .with_after("Donna TV")]);

    let result = reconcile(&png, &xml, &MatchOptions::default());
    let donna = key("1_0_1_27_791A_217C_EEEE0000_0_0_0");
    assert!(result.partition.both.contains(&donna));
    assert!(result.partition.png_only.is_empty());
    assert!(result.partition.xml_only.is_empty());
    assert_eq!(
        result.report.lines.mapping,
        vec!["1_0_1_27_791A_217C_EEEE0000_0_0_0 - Donna TV - 13.0E"]
    );
}

#[test]
fn unnamed_channel_entry_keeps_its_id_in_mapping() {
    let png = Catalog::from_png_paths(["logos/E2LIST/19.2E/1_0_19_283D_3FB_1_C00000_0_0_0.png"]);
    let xml = Catalog::from_xml_entries([RawXmlEntry::new(
        "DasErste.de",
        "1:0:19:283D:3FB:1:C00000:0:0:0:",
    )
    .with_before("19.2E")
    .with_section("19.2E")]);

    let result = reconcile(&png, &xml, &MatchOptions::default());
    assert_eq!(
        result.report.lines.mapping,
        vec!["1_0_19_283D_3FB_1_C00000_0_0_0 - DasErste.de - 19.2E"]
    );
}

#[test]
fn unknown_logo_has_no_suggestions() {
    let png = Catalog::from_png_paths(["logos/E2LIST/19.2E/1_0_99_99_99_99_FFFF0000_0_0_0.png"]);
    let xml = Catalog::from_xml_entries([RawXmlEntry::new(
        "DonnaTV.it",
        "1:0:1:27:791A:217C:EEEE0000:0:0:0:",
    )
    .with_after("Donna TV")]);

    let orphan = key("1_0_99_99_99_99_FFFF0000_0_0_0");
    let parts = partition(&png, &xml);
    assert!(parts.png_only.contains(&orphan));
    assert!(suggest_matches(&orphan, &xml, &MatchOptions::default()).is_empty());

    let result = reconcile(&png, &xml, &MatchOptions::default());
    let line = &result.report.lines.png_only[0];
    assert!(line.ends_with("UNKN - 19.2E"), "unexpected line: {line}");
    assert_eq!(result.report.resolutions[&orphan], PngOnlyResolution::Unknown);
}

#[test]
fn named_entry_wins_over_unnamed_duplicate() {
    let xml = Catalog::from_xml_entries([
        RawXmlEntry::new("ChannelX.uk", "1:0:5:5:5:5:AAAA0000:0:0:0:")
            .with_before("13.0E")
            .with_after("Channel X"),
        RawXmlEntry::new("ChannelX.uk", "1:0:5:5:5:5:AAAA0000:0:0:0:").with_before("19.2E"),
    ]);

    let record = xml.get(&key("1_0_5_5_5_5_AAAA0000_0_0_0")).unwrap();
    assert_eq!(record.display_name, "Channel X");
    let sats: Vec<&str> = record.satellites.iter().map(|s| s.as_str()).collect();
    assert_eq!(sats, vec!["13.0E", "19.2E"]);
}

#[test]
fn malformed_reference_is_skipped() {
    let good = RawXmlEntry::new("DonnaTV.it", "1:0:1:27:791A:217C:EEEE0000:0:0:0:");
    let before = Catalog::from_xml_entries([good.clone()]);
    let after = Catalog::from_xml_entries([good, RawXmlEntry::new("Broken.it", "1:0:1:X")]);

    assert_eq!(after.len(), before.len());
    assert_eq!(after.skipped(), before.skipped() + 1);
}

#[test]
fn normalization_round_trips() {
    let samples = [
        "1_0_1_27_791A_217C_EEEE0000_0_0_0",
        "1_0_19_1b_3f_1_c00000_0_0_0",
        "1_0_16_5a_1f4_13e_820000_0_0_0",
    ];
    for sample in samples {
        let fields = to_canonical_fields(sample, Delimiter::Underscore).unwrap();
        let colon = to_canonical_fields(&encode(&fields, Delimiter::Colon), Delimiter::Colon).unwrap();
        let underscore =
            to_canonical_fields(&encode(&fields, Delimiter::Underscore), Delimiter::Underscore)
                .unwrap();
        assert_eq!(colon, fields);
        assert_eq!(underscore, fields);
        assert!(keys_equal(sample, &encode(&fields, Delimiter::Colon)));
    }
}

#[test]
fn every_key_lands_in_exactly_one_partition() {
    let png = Catalog::from_png_paths([
        "logos/13.0E/1_0_1_1_1_1_EEEE0000_0_0_0.png",
        "logos/13.0E/1_0_1_2_2_2_EEEE0000_0_0_0.png",
        "logos/19.2E/1_0_1_3_3_3_C00000_0_0_0.png",
    ]);
    let xml = Catalog::from_xml_entries([
        RawXmlEntry::new("One", "1:0:1:1:1:1:EEEE0000:0:0:0:"),
        RawXmlEntry::new("Three", "1:0:1:3:3:3:c00000:0:0:0:"),
        RawXmlEntry::new("Four", "1:0:1:4:4:4:EEEE0000:0:0:0:"),
    ]);

    let parts = partition(&png, &xml);
    for k in png.keys().chain(xml.keys()) {
        let hits = [&parts.both, &parts.png_only, &parts.xml_only]
            .iter()
            .filter(|set| set.contains(k))
            .count();
        assert_eq!(hits, 1, "{k}");
    }
    assert_eq!(parts.total(), 4);
}
