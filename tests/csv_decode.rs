use catalog_ingest::ingestion::decode::decode;
use catalog_ingest::IngestError;

#[test]
fn decode_pairs_values_with_headers_and_trims() {
    let input = b" sku , name ,brand\n A1 , Crew Tee ,Acme\n";
    let rows = decode(input).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("sku"), Some("A1"));
    assert_eq!(rows[0].get("name"), Some("Crew Tee"));
    assert_eq!(rows[0].get("brand"), Some("Acme"));
}

#[test]
fn decode_numbers_rows_from_two() {
    let input = b"sku,name\nA1,Tee\nA2,Hat\n";
    let rows = decode(input).unwrap();

    assert_eq!(rows[0].line, 2);
    assert_eq!(rows[1].line, 3);
}

#[test]
fn decode_strips_leading_bom() {
    let with_bom = b"\xef\xbb\xbfsku,name\nA1,Tee\n";
    let without_bom = b"sku,name\nA1,Tee\n";

    assert_eq!(decode(with_bom).unwrap(), decode(without_bom).unwrap());
    assert_eq!(decode(with_bom).unwrap()[0].get("sku"), Some("A1"));
}

#[test]
fn decode_pads_short_rows_with_empty_strings() {
    let input = b"sku,name,brand\nA1,Tee\n";
    let rows = decode(input).unwrap();

    assert_eq!(rows[0].get("brand"), Some(""));
}

#[test]
fn decode_carries_unknown_columns() {
    let input = b"sku,name,warehouse\nA1,Tee,EU-1\n";
    let rows = decode(input).unwrap();

    assert_eq!(rows[0].get("warehouse"), Some("EU-1"));
}

#[test]
fn decode_rejects_invalid_utf8() {
    let input = b"sku,name\nA1,\xff\xfe\n";
    let err = decode(input).unwrap_err();

    assert!(matches!(err, IngestError::Decode(_)));
    assert!(err.to_string().contains("not valid utf-8"));
}

#[test]
fn decode_empty_input_yields_no_rows() {
    assert!(decode(b"").unwrap().is_empty());
    assert!(decode(b"sku,name,brand,mrp,price\n").unwrap().is_empty());
}
