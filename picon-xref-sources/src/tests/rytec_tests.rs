use super::*;

const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<channels>
<!-- 13.0E -->
<channel id="DonnaTV.it">1:0:1:27:791A:217C:EEEE0000:0:0:0:</channel><!-- Donna TV -->
<channel id="Rai1.it">1:0:1:D49:1356:13E:820000:0:0:0:</channel>
<!-- Rai 2 HD -->
<channel id="Rai2.it">1:0:19:D4A:1356:13E:820000:0:0:0:</channel>
<!-- 19.2E -->
<channel id="DasErste.de">1:0:19:283D:3FB:1:C00000:0:0:0:</channel><!-- Das Erste HD -->
<channel id="Arte &amp; Co.fr">1:0:1:6FF2:401:1:C00000:0:0:0:</channel>
</channels>
"#;

fn entries() -> Vec<RawXmlEntry> {
    parse_rytec(SAMPLE.as_bytes()).unwrap()
}

#[test]
fn test_reads_every_channel_in_order() {
    let ids: Vec<String> = entries().into_iter().map(|e| e.channel_id).collect();
    assert_eq!(
        ids,
        vec!["DonnaTV.it", "Rai1.it", "Rai2.it", "DasErste.de", "Arte & Co.fr"]
    );
}

#[test]
fn test_trailing_comment_is_after() {
    let all = entries();
    assert_eq!(all[0].after.as_deref(), Some("Donna TV"));
    assert_eq!(all[0].service_ref, "1:0:1:27:791A:217C:EEEE0000:0:0:0:");
    assert_eq!(all[3].after.as_deref(), Some("Das Erste HD"));
    assert_eq!(all[1].after, None);
}

#[test]
fn test_leading_comment_is_before() {
    let all = entries();
    assert_eq!(all[0].before.as_deref(), Some("13.0E"));
    assert_eq!(all[2].before.as_deref(), Some("Rai 2 HD"));
    assert_eq!(all[3].before.as_deref(), Some("19.2E"));
}

#[test]
fn test_section_label_carries_forward() {
    let all = entries();
    // No comment of its own, so it inherits the satellite heading.
    assert_eq!(all[1].before.as_deref(), Some("13.0E"));
    assert_eq!(all[4].before.as_deref(), Some("19.2E"));
}

#[test]
fn test_name_comment_keeps_section_heading() {
    let all = entries();
    assert_eq!(all[2].before.as_deref(), Some("Rai 2 HD"));
    assert_eq!(all[2].section.as_deref(), Some("13.0E"));
    assert_eq!(all[3].section.as_deref(), Some("19.2E"));

    let catalog = picon_xref_core::Catalog::from_xml_entries(all);
    let key = picon_xref_core::ServiceKey::from_src("1_0_19_D4A_1356_13E_820000_0_0_0").unwrap();
    assert_eq!(catalog.get(&key).unwrap().satellites_label(), "13.0E");
}

#[test]
fn test_trailing_comment_does_not_leak_forward() {
    let all = entries();
    assert_ne!(all[1].before.as_deref(), Some("Donna TV"));
}

#[test]
fn test_entries_build_a_catalog() {
    let catalog = picon_xref_core::Catalog::from_xml_entries(entries());
    assert_eq!(catalog.len(), 5);
    let key = picon_xref_core::ServiceKey::from_src("1_0_19_D4A_1356_13E_820000_0_0_0").unwrap();
    assert_eq!(catalog.get(&key).unwrap().display_name, "Rai 2 HD");
}

#[test]
fn test_malformed_xml_is_an_error() {
    let xml = r#"<channels><channel id="X">1:0:1:1:1:1:0:0:0:0:</chanel></channels>"#;
    assert!(matches!(
        parse_rytec(xml.as_bytes()),
        Err(SourceError::XmlParse(_))
    ));
}

#[test]
fn test_empty_document_has_no_entries() {
    let xml = r#"<?xml version="1.0"?><channels></channels>"#;
    assert!(parse_rytec(xml.as_bytes()).unwrap().is_empty());
}

#[test]
fn test_parse_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rytec.channels.xml");
    std::fs::write(&path, SAMPLE).unwrap();
    assert_eq!(parse_rytec_file(&path).unwrap().len(), 5);
}
