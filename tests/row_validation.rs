use catalog_ingest::ingestion::decode::{decode, RawRow};
use catalog_ingest::ingestion::validate::{validate_row, RowRejection, RuleViolation};

/// Decode a one-row CSV and hand back that row.
fn row(csv: &str) -> RawRow {
    let rows = decode(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1, "helper expects exactly one data row");
    rows.into_iter().next().unwrap()
}

#[test]
fn valid_row_produces_a_record() {
    let r = row("sku,name,brand,mrp,price,quantity\nA1,Shirt,Acme,500,450,10\n");
    let record = validate_row(&r).unwrap();

    assert_eq!(record.sku(), "A1");
    assert_eq!(record.name(), "Shirt");
    assert_eq!(record.brand(), "Acme");
    assert_eq!(record.mrp(), 500.0);
    assert_eq!(record.price(), 450.0);
    assert_eq!(record.quantity(), 10);
    assert_eq!(record.color(), None);
    assert_eq!(record.size(), None);
}

#[test]
fn missing_required_fields_lists_every_gap() {
    let r = row("sku,name,brand,mrp,price\nA1,,Acme,,450\n");
    let failure = validate_row(&r).unwrap_err();

    assert_eq!(failure.row, 2);
    assert_eq!(
        failure.reason,
        RowRejection::MissingRequiredFields(vec!["name".to_string(), "mrp".to_string()])
    );
    assert_eq!(
        failure.reason.to_string(),
        "missing required fields: name, mrp"
    );
}

#[test]
fn absent_required_column_is_a_missing_field() {
    let r = row("sku,name,mrp,price\nA1,Shirt,500,450\n");
    let failure = validate_row(&r).unwrap_err();

    assert_eq!(
        failure.reason,
        RowRejection::MissingRequiredFields(vec!["brand".to_string()])
    );
}

#[test]
fn non_numeric_price_is_a_conversion_error() {
    let r = row("sku,name,brand,mrp,price\nA1,Shirt,Acme,500,abc\n");
    let failure = validate_row(&r).unwrap_err();

    match &failure.reason {
        RowRejection::NumericConversion { column, .. } => assert_eq!(column, "price"),
        other => panic!("expected conversion error, got {other:?}"),
    }
    assert!(failure.reason.to_string().contains("numeric conversion error"));
}

#[test]
fn malformed_quantity_is_a_conversion_error_not_zero() {
    let r = row("sku,name,brand,mrp,price,quantity\nA1,Shirt,Acme,500,450,lots\n");
    let failure = validate_row(&r).unwrap_err();

    match &failure.reason {
        RowRejection::NumericConversion { column, .. } => assert_eq!(column, "quantity"),
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn fractional_quantity_is_a_conversion_error() {
    let r = row("sku,name,brand,mrp,price,quantity\nA1,Shirt,Acme,500,450,1.5\n");
    assert!(matches!(
        validate_row(&r).unwrap_err().reason,
        RowRejection::NumericConversion { .. }
    ));
}

#[test]
fn empty_quantity_defaults_to_zero() {
    let r = row("sku,name,brand,mrp,price,quantity\nA1,Shirt,Acme,500,450,\n");
    assert_eq!(validate_row(&r).unwrap().quantity(), 0);

    let r = row("sku,name,brand,mrp,price\nA1,Shirt,Acme,500,450\n");
    assert_eq!(validate_row(&r).unwrap().quantity(), 0);
}

#[test]
fn price_above_mrp_is_a_business_rule_violation() {
    let r = row("sku,name,brand,mrp,price\nA1,Shirt,Acme,100,150\n");
    let failure = validate_row(&r).unwrap_err();

    assert_eq!(
        failure.reason,
        RowRejection::BusinessRule(RuleViolation::PriceExceedsMrp)
    );
    assert_eq!(
        failure.reason.to_string(),
        "business rule violation: price cannot be higher than MRP"
    );
}

#[test]
fn negative_quantity_is_a_business_rule_violation() {
    let r = row("sku,name,brand,mrp,price,quantity\nA1,Shirt,Acme,500,450,-3\n");
    assert_eq!(
        validate_row(&r).unwrap_err().reason,
        RowRejection::BusinessRule(RuleViolation::NegativeQuantity)
    );
}

#[test]
fn price_rule_is_checked_before_quantity_rule() {
    // Both rules violated; only the first is reported.
    let r = row("sku,name,brand,mrp,price,quantity\nA1,Shirt,Acme,100,150,-3\n");
    assert_eq!(
        validate_row(&r).unwrap_err().reason,
        RowRejection::BusinessRule(RuleViolation::PriceExceedsMrp)
    );
}

#[test]
fn empty_color_and_size_become_absent() {
    let r = row("sku,name,brand,mrp,price,color,size\nA1,Shirt,Acme,500,450,,\n");
    let record = validate_row(&r).unwrap();

    assert_eq!(record.color(), None);
    assert_eq!(record.size(), None);

    let r = row("sku,name,brand,mrp,price,color,size\nA1,Shirt,Acme,500,450,red,M\n");
    let record = validate_row(&r).unwrap();

    assert_eq!(record.color(), Some("red"));
    assert_eq!(record.size(), Some("M"));
}

#[test]
fn failure_keeps_the_normalized_row_payload() {
    let r = row("sku,name,brand,mrp,price,warehouse\nA1,Shirt,Acme,500,abc,EU-1\n");
    let failure = validate_row(&r).unwrap_err();

    assert_eq!(failure.row_data.get("price").map(String::as_str), Some("abc"));
    // Unknown columns are ignored by validation but preserved for the caller.
    assert_eq!(
        failure.row_data.get("warehouse").map(String::as_str),
        Some("EU-1")
    );
}
