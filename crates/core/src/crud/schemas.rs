//! Rules for each record screen

use mizan_common::validation::{
    EmailValidator, FieldValidator, RangeValidator, StringValidator, ValidationError, Validator,
};
use mizan_domain::constants::{
    MIN_PASSWORD_LENGTH, MSG_FIELD_REQUIRED, MSG_INVALID_CHOICE, MSG_INVALID_EMAIL,
    MSG_INVALID_PHONE, MSG_ITEMS_REQUIRED, MSG_MUST_BE_POSITIVE, MSG_MUST_NOT_BE_NEGATIVE,
    MSG_PASSWORD_TOO_SHORT, PHONE_PATTERN,
};
use mizan_domain::{
    Category, Currency, Customer, Order, OrderItem, PaymentType, PaymentVoucher, Product,
    ResourceKind, SaleReturn, ShipmentRequest, User, UserRole, Visit,
};
use once_cell::sync::Lazy;

use super::schema::{ResourceSchema, SaveMode};

/// `PHONE_PATTERN` is a compile-time constant; `phone_pattern_compiles` pins it.
static PHONE: Lazy<StringValidator> = Lazy::new(|| {
    StringValidator::new()
        .pattern(PHONE_PATTERN)
        .expect("PHONE_PATTERN is valid and well-formed")
        .message(MSG_INVALID_PHONE)
});

static NON_NEGATIVE: Lazy<RangeValidator<f64>> =
    Lazy::new(|| RangeValidator::empty().min(0.0).message(MSG_MUST_NOT_BE_NEGATIVE));

fn non_negative(v: &mut Validator, field: &str, value: Option<f64>) {
    if let Some(value) = value {
        v.validate_field(field, &value, &*NON_NEGATIVE);
    }
}

fn positive(v: &mut Validator, field: &str, value: Option<f64>) {
    match value {
        None => {
            v.add_error(field, MSG_FIELD_REQUIRED);
        }
        Some(value) if value <= 0.0 => {
            v.add_error(field, MSG_MUST_BE_POSITIVE);
        }
        Some(_) => {}
    }
}

fn choice<T: std::str::FromStr>(v: &mut Validator, field: &str, raw: Option<&str>) {
    if let Some(raw) = raw {
        if raw.parse::<T>().is_err() {
            v.add_error(field, MSG_INVALID_CHOICE);
        }
    }
}

fn items(v: &mut Validator, lines: &[OrderItem]) {
    if lines.is_empty() {
        v.add_error("items", MSG_ITEMS_REQUIRED);
        return;
    }

    v.validate_nested("items", |v| {
        for (index, line) in lines.iter().enumerate() {
            v.validate_nested(&index.to_string(), |v| {
                v.require("product_id", line.product_id.as_ref(), MSG_FIELD_REQUIRED);
                positive(v, "quantity", line.quantity);
                non_negative(v, "price", line.price);
            });
        }
    });
}

pub struct CustomerSchema;

impl ResourceSchema for CustomerSchema {
    const KIND: ResourceKind = ResourceKind::Customers;
    type Record = Customer;

    fn validate(record: &Customer, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require_text("name", record.name.as_deref(), MSG_FIELD_REQUIRED)
            .validate_optional("phone", record.phone.as_deref(), &*PHONE);
        choice::<PaymentType>(&mut v, "payment_type", record.payment_type.as_deref());
        non_negative(&mut v, "credit_limit", record.credit_limit);
        v.finalize()
    }

    fn unique_name(record: &Customer) -> Option<&str> {
        record.name.as_deref()
    }
}

pub struct ProductSchema;

impl ResourceSchema for ProductSchema {
    const KIND: ResourceKind = ResourceKind::Products;
    type Record = Product;

    fn validate(record: &Product, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require_text("name", record.name.as_deref(), MSG_FIELD_REQUIRED)
            .require("category_id", record.category_id.as_ref(), MSG_FIELD_REQUIRED)
            .require("price", record.price.as_ref(), MSG_FIELD_REQUIRED);
        non_negative(&mut v, "price", record.price);
        non_negative(&mut v, "wholesale_price", record.wholesale_price);
        non_negative(&mut v, "quantity", record.quantity);
        v.finalize()
    }

    fn unique_name(record: &Product) -> Option<&str> {
        record.name.as_deref()
    }
}

pub struct CategorySchema;

impl ResourceSchema for CategorySchema {
    const KIND: ResourceKind = ResourceKind::Categories;
    type Record = Category;

    fn validate(record: &Category, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require_text("name", record.name.as_deref(), MSG_FIELD_REQUIRED);
        v.finalize()
    }

    fn unique_name(record: &Category) -> Option<&str> {
        record.name.as_deref()
    }
}

pub struct CurrencySchema;

impl ResourceSchema for CurrencySchema {
    const KIND: ResourceKind = ResourceKind::Currencies;
    type Record = Currency;

    fn validate(record: &Currency, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require_text("name", record.name.as_deref(), MSG_FIELD_REQUIRED)
            .require_text("code", record.code.as_deref(), MSG_FIELD_REQUIRED);
        positive(&mut v, "exchange_rate", record.exchange_rate);
        v.finalize()
    }

    fn unique_name(record: &Currency) -> Option<&str> {
        record.name.as_deref()
    }
}

pub struct OrderSchema;

impl ResourceSchema for OrderSchema {
    const KIND: ResourceKind = ResourceKind::Orders;
    type Record = Order;

    fn validate(record: &Order, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require("customer_id", record.customer_id.as_ref(), MSG_FIELD_REQUIRED);
        non_negative(&mut v, "discount", record.discount);
        items(&mut v, &record.items);
        v.finalize()
    }
}

pub struct ShipmentRequestSchema;

impl ResourceSchema for ShipmentRequestSchema {
    const KIND: ResourceKind = ResourceKind::ShipmentRequests;
    type Record = ShipmentRequest;

    fn validate(record: &ShipmentRequest, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        items(&mut v, &record.items);
        v.finalize()
    }
}

pub struct SaleReturnSchema;

impl ResourceSchema for SaleReturnSchema {
    const KIND: ResourceKind = ResourceKind::SaleReturns;
    type Record = SaleReturn;

    fn validate(record: &SaleReturn, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require("customer_id", record.customer_id.as_ref(), MSG_FIELD_REQUIRED);
        items(&mut v, &record.items);
        v.finalize()
    }
}

pub struct PaymentVoucherSchema;

impl ResourceSchema for PaymentVoucherSchema {
    const KIND: ResourceKind = ResourceKind::PaymentVouchers;
    type Record = PaymentVoucher;

    fn validate(record: &PaymentVoucher, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require("customer_id", record.customer_id.as_ref(), MSG_FIELD_REQUIRED);
        positive(&mut v, "amount", record.amount);
        v.finalize()
    }
}

/// Shared by representatives and admins
fn validate_user(record: &User, mode: SaveMode) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.require_text("name", record.name.as_deref(), MSG_FIELD_REQUIRED)
        .require_text("email", record.email.as_deref(), MSG_FIELD_REQUIRED)
        .validate_optional("phone", record.phone.as_deref(), &*PHONE);

    if let Some(email) = record.email.as_deref().filter(|e| !e.trim().is_empty()) {
        if EmailValidator::new().validate(email).is_err() {
            v.add_error("email", MSG_INVALID_EMAIL);
        }
    }

    match record.password.as_deref() {
        None | Some("") if mode == SaveMode::Create => {
            v.add_error("password", MSG_FIELD_REQUIRED);
        }
        Some(password) if !password.is_empty() => {
            let length = StringValidator::new().trim(false).min_length(MIN_PASSWORD_LENGTH);
            if length.validate(password).is_err() {
                v.add_error("password", MSG_PASSWORD_TOO_SHORT);
            }
        }
        _ => {}
    }

    choice::<UserRole>(&mut v, "role", record.role.as_deref());
    v.finalize()
}

pub struct UserSchema;

impl ResourceSchema for UserSchema {
    const KIND: ResourceKind = ResourceKind::Users;
    type Record = User;

    fn validate(record: &User, mode: SaveMode) -> Result<(), ValidationError> {
        validate_user(record, mode)
    }

    fn unique_name(record: &User) -> Option<&str> {
        record.name.as_deref()
    }
}

pub struct AdminSchema;

impl ResourceSchema for AdminSchema {
    const KIND: ResourceKind = ResourceKind::Admins;
    type Record = User;

    fn validate(record: &User, mode: SaveMode) -> Result<(), ValidationError> {
        validate_user(record, mode)
    }

    fn unique_name(record: &User) -> Option<&str> {
        record.name.as_deref()
    }
}

pub struct VisitSchema;

impl ResourceSchema for VisitSchema {
    const KIND: ResourceKind = ResourceKind::Visits;
    type Record = Visit;

    fn validate(record: &Visit, _mode: SaveMode) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require("customer_id", record.customer_id.as_ref(), MSG_FIELD_REQUIRED)
            .require("user_id", record.user_id.as_ref(), MSG_FIELD_REQUIRED);
        v.finalize()
    }
}
