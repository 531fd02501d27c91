//! Decoding realistic backend payloads into domain records

use mizan_domain::{
    normalize_item, normalize_list, slugify, Customer, Page, PaymentType, PaymentVoucher, Record,
    ResourceKind, User, UserRole, Visit,
};
use serde_json::json;

#[test]
fn customer_list_from_paginated_laravel_response() {
    let body = json!({
        "status": true,
        "data": {
            "current_page": 1,
            "data": [
                {
                    "id": 7,
                    "slug": "بقالة-النور",
                    "name": "بقالة النور",
                    "phone": 777123456,
                    "payment_type": "Credit",
                    "credit_limit": "250000.00",
                    "currency": { "id": 1, "code": "YER" }
                },
                { "id": "8", "slug": "ali", "name": "Ali", "payment_type": "cash" }
            ],
            "last_page": 4,
            "per_page": 2,
            "total": 8
        }
    });

    let page: Page<Customer> = normalize_list(body, ResourceKind::Customers).unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more());

    let first = &page.items[0];
    assert_eq!(first.slug(), Some("بقالة-النور"));
    assert_eq!(first.slug.as_deref().map(slugify), Some(slugify("بقالة النور")));
    assert_eq!(first.payment_type(), Some(PaymentType::Credit));
    assert_eq!(first.credit_limit, Some(250_000.0));
    assert_eq!(first.phone.as_deref(), Some("777123456"));
    assert!(first.extra.contains_key("currency"));

    assert_eq!(page.items[1].id(), Some(8));
}

#[test]
fn unknown_fields_survive_a_round_trip() {
    let raw = json!({ "id": 3, "amount": "100", "customer_id": 9, "attachment": "v.pdf" });
    let voucher: PaymentVoucher = serde_json::from_value(raw).unwrap();

    let back = serde_json::to_value(&voucher).unwrap();
    assert_eq!(back["attachment"], "v.pdf");
    assert_eq!(back["amount"], 100.0);
}

#[test]
fn admin_from_named_envelope() {
    let body = json!({ "status": true, "admin": { "id": 1, "name": "Root", "role": "admin" } });
    let admin: User = normalize_item(body, ResourceKind::Admins).unwrap();
    assert_eq!(admin.role(), Some(UserRole::Admin));
}

#[test]
fn visits_from_bare_array() {
    let body = json!([{ "id": 1, "latitude": "15.35", "longitude": 44.2 }]);
    let page: Page<Visit> = normalize_list(body, ResourceKind::Visits).unwrap();
    assert_eq!(page.items[0].latitude, Some(15.35));
    assert_eq!(page.current_page, None);
}
