use shared::domain::SpoolId;

use super::*;

#[test]
fn bare_ids_pass_through() {
    let scanned = parse_scan(" 42 ").expect("scan");
    assert_eq!(scanned.spool_id, SpoolId::new("42"));
    assert_eq!(scanned.origin, None);
}

#[test]
fn extracts_id_and_origin_from_tag_url() {
    let scanned =
        parse_scan("http://spool-scanner:8080/select/SPOOL_123?src=nfc").expect("scan");
    assert_eq!(scanned.spool_id, SpoolId::new("SPOOL_123"));
    assert_eq!(
        scanned.origin.map(|url| url.to_string()),
        Some("http://spool-scanner:8080/".to_string())
    );
}

#[test]
fn decodes_escaped_ids_from_tag_url() {
    let scanned = parse_scan("http://spool-scanner/select/PLA%20Black").expect("scan");
    assert_eq!(scanned.spool_id, SpoolId::new("PLA Black"));

    let scanned = parse_scan("http://spool-scanner/select/a%2Fb").expect("scan");
    assert_eq!(scanned.spool_id, SpoolId::new("a/b"));
}

#[test]
fn rejects_ids_that_are_not_utf8() {
    assert!(parse_scan("http://spool-scanner/select/%FF").is_err());
}

#[test]
fn rejects_empty_ids() {
    assert!(parse_scan("").is_err());
    assert!(parse_scan("http://spool-scanner/select/").is_err());
    assert!(parse_scan("http://spool-scanner/select").is_err());
}

#[test]
fn rejects_other_paths() {
    let err = parse_scan("http://spool-scanner/printers/1").expect_err("wrong path");
    assert!(err.to_string().contains("Invalid URL"));
}
