use serde_json::json;

use crate::{
    domain::{Printer, PrinterId, PrinterStatus, Spool, SpoolId},
    error::ErrorBody,
    protocol::{AssignRequest, PrintersResponse},
};

#[test]
fn decodes_printers_response_from_server_shape() {
    let body = json!({
        "printers": [
            {
                "id": "printer-1",
                "name": "Kitchen",
                "status": "Ready",
                "url": "http://octopi.local",
                "current_spool": {
                    "id": "17",
                    "name": "Galaxy Black | PLA",
                    "material": "PLA",
                    "color": "#111111"
                }
            },
            { "id": "printer-2", "name": "Garage", "status": "Offline", "url": "" }
        ]
    });

    let parsed: PrintersResponse = serde_json::from_value(body).expect("decode printers");
    assert_eq!(parsed.printers.len(), 2);

    let kitchen = &parsed.printers[0];
    assert_eq!(kitchen.id, PrinterId::new("printer-1"));
    assert_eq!(kitchen.status, PrinterStatus::Ready);
    assert_eq!(kitchen.redirect_url(), Some("http://octopi.local"));
    assert_eq!(
        kitchen.current_spool.as_ref().map(|spool| spool.material.as_str()),
        Some("PLA")
    );

    let garage = &parsed.printers[1];
    assert_eq!(garage.status, PrinterStatus::Other("Offline".to_string()));
    assert_eq!(garage.redirect_url(), None);
}

#[test]
fn unknown_status_is_kept_verbatim_on_the_wire() {
    let printer = Printer::new("p", "Operational (paused)");
    let encoded = serde_json::to_value(&printer).expect("encode");
    assert_eq!(encoded["status"], "Operational (paused)");
}

#[test]
fn printing_printers_are_not_selectable() {
    assert!(!Printer::new("p", "Printing").is_selectable());
    assert!(Printer::new("p", "Error").is_selectable());
    assert!(Printer::new("p", "Unknown").is_selectable());
}

#[test]
fn spool_defaults_missing_weights_to_zero() {
    let spool: Spool =
        serde_json::from_value(json!({ "id": "42", "extra": true })).expect("decode");
    assert_eq!(spool.id, Some(SpoolId::new("42")));
    assert_eq!(spool.weight, 0.0);
    assert_eq!(spool.remaining, 0.0);
}

#[test]
fn spool_display_name_falls_back_to_material_and_vendor() {
    let named = Spool {
        name: Some("Galaxy Black | PLA".into()),
        ..Spool::default()
    };
    assert_eq!(named.display_name(), "Galaxy Black | PLA");

    let unnamed = Spool {
        name: Some(String::new()),
        material: Some("PETG".into()),
        vendor: Some("Prusament".into()),
        ..Spool::default()
    };
    assert_eq!(unnamed.display_name(), "PETG - Prusament");
}

#[test]
fn spool_display_color_prefers_hex_then_color_then_gray() {
    let mut spool = Spool {
        color: Some("#ff0000".into()),
        color_hex: Some("#00ff00".into()),
        ..Spool::default()
    };
    assert_eq!(spool.display_color(), "#00ff00");

    spool.color_hex = None;
    assert_eq!(spool.display_color(), "#ff0000");

    spool.color = None;
    assert_eq!(spool.display_color(), "#888");
}

#[test]
fn assign_request_uses_snake_case_keys() {
    let request = AssignRequest {
        spool_id: SpoolId::new("17"),
        printer_id: PrinterId::new("printer-2"),
    };
    assert_eq!(
        serde_json::to_value(&request).expect("encode"),
        json!({ "spool_id": "17", "printer_id": "printer-2" })
    );
}

#[test]
fn error_body_ignores_empty_messages() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":""}"#).expect("decode");
    assert_eq!(body.message(), None);

    let body: ErrorBody = serde_json::from_str(r#"{"error":"printer busy"}"#).expect("decode");
    assert_eq!(body.message(), Some("printer busy"));

    let body: ErrorBody = serde_json::from_str("{}").expect("decode");
    assert_eq!(body.message(), None);
}
