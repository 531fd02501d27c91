//! Record commands, dispatched to the controller of each resource

use mizan_core::crud::{
    AdminSchema, CategorySchema, CurrencySchema, CustomerSchema, OrderSchema,
    PaymentVoucherSchema, ProductSchema, SaleReturnSchema, ShipmentRequestSchema, UserSchema,
    VisitSchema,
};
use mizan_core::{ListQuery, MutationOutcome, ResourceSchema};
use mizan_domain::constants::{MSG_NOT_FOUND, STATUS_NOT_FOUND};
use mizan_domain::{slugify, ApiError, ResourceKind};
use serde_json::{json, Value};
use tracing::warn;

use super::{to_json, CommandError};
use crate::cli::QueryArgs;
use crate::context::AppContext;

/// Run `$body` with `$schema` bound to the schema of `$kind`.
macro_rules! with_schema {
    ($kind:expr, $schema:ident => $body:expr) => {
        match $kind {
            ResourceKind::Customers => {
                type $schema = CustomerSchema;
                $body
            }
            ResourceKind::Products => {
                type $schema = ProductSchema;
                $body
            }
            ResourceKind::Categories => {
                type $schema = CategorySchema;
                $body
            }
            ResourceKind::Currencies => {
                type $schema = CurrencySchema;
                $body
            }
            ResourceKind::Orders => {
                type $schema = OrderSchema;
                $body
            }
            ResourceKind::ShipmentRequests => {
                type $schema = ShipmentRequestSchema;
                $body
            }
            ResourceKind::SaleReturns => {
                type $schema = SaleReturnSchema;
                $body
            }
            ResourceKind::PaymentVouchers => {
                type $schema = PaymentVoucherSchema;
                $body
            }
            ResourceKind::Users => {
                type $schema = UserSchema;
                $body
            }
            ResourceKind::Admins => {
                type $schema = AdminSchema;
                $body
            }
            ResourceKind::Visits => {
                type $schema = VisitSchema;
                $body
            }
            other @ (ResourceKind::CarStocks | ResourceKind::Dashboard) => Err(not_a_record(other)),
        }
    };
}

pub async fn list(ctx: &AppContext, kind: ResourceKind, query: &QueryArgs) -> Result<Value, CommandError> {
    with_schema!(kind, S => list_as::<S>(ctx, query).await)
}

pub async fn show(ctx: &AppContext, kind: ResourceKind, slug: &str) -> Result<Value, CommandError> {
    with_schema!(kind, S => show_as::<S>(ctx, slug).await)
}

pub async fn create(
    ctx: &AppContext,
    kind: ResourceKind,
    record: &str,
    refresh: &QueryArgs,
) -> Result<Value, CommandError> {
    with_schema!(kind, S => create_as::<S>(ctx, record, refresh).await)
}

pub async fn update(
    ctx: &AppContext,
    kind: ResourceKind,
    slug: &str,
    record: &str,
    refresh: &QueryArgs,
) -> Result<Value, CommandError> {
    with_schema!(kind, S => update_as::<S>(ctx, slug, record, refresh).await)
}

pub async fn delete(
    ctx: &AppContext,
    kind: ResourceKind,
    slug: &str,
    refresh: &QueryArgs,
) -> Result<Value, CommandError> {
    with_schema!(kind, S => delete_as::<S>(ctx, slug, refresh).await)
}

pub async fn check_slug(ctx: &AppContext, kind: ResourceKind, name: &str) -> Result<Value, CommandError> {
    with_schema!(kind, S => check_slug_as::<S>(ctx, name).await)
}

async fn list_as<S: ResourceSchema>(ctx: &AppContext, query: &QueryArgs) -> Result<Value, CommandError> {
    let page = ctx.controller::<S>().list(&to_list_query(query)).await?;
    to_json(&page)
}

async fn show_as<S: ResourceSchema>(ctx: &AppContext, slug: &str) -> Result<Value, CommandError> {
    match ctx.controller::<S>().fetch(slug).await? {
        Some(record) => to_json(&record),
        None => Err(ApiError::http(STATUS_NOT_FOUND, Some(MSG_NOT_FOUND.to_string()), None).into()),
    }
}

async fn create_as<S: ResourceSchema>(
    ctx: &AppContext,
    raw: &str,
    refresh: &QueryArgs,
) -> Result<Value, CommandError> {
    let record = parse_record::<S>(raw)?;
    let outcome = ctx.controller::<S>().create(&record, &to_list_query(refresh)).await?;
    outcome_json(outcome)
}

async fn update_as<S: ResourceSchema>(
    ctx: &AppContext,
    slug: &str,
    raw: &str,
    refresh: &QueryArgs,
) -> Result<Value, CommandError> {
    let record = parse_record::<S>(raw)?;
    let outcome = ctx.controller::<S>().update(slug, &record, &to_list_query(refresh)).await?;
    outcome_json(outcome)
}

async fn delete_as<S: ResourceSchema>(
    ctx: &AppContext,
    slug: &str,
    refresh: &QueryArgs,
) -> Result<Value, CommandError> {
    let outcome = ctx.controller::<S>().delete(slug, &to_list_query(refresh)).await?;
    outcome_json(outcome)
}

async fn check_slug_as<S: ResourceSchema>(ctx: &AppContext, name: &str) -> Result<Value, CommandError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(CommandError::Usage(format!("`{name}` does not produce a slug")));
    }

    let available = ctx.controller::<S>().is_slug_available(&slug).await?;
    Ok(json!({ "slug": slug, "available": available }))
}

fn to_list_query(args: &QueryArgs) -> ListQuery {
    let mut query = ListQuery::new();
    for (key, value) in &args.filters {
        query = query.filter(key.as_str(), value.as_str());
    }
    if let Some(page) = args.page {
        query = query.page(page);
    }
    if let Some(per_page) = args.per_page {
        query = query.per_page(per_page);
    }
    query
}

fn parse_record<S: ResourceSchema>(raw: &str) -> Result<S::Record, CommandError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CommandError::Usage(format!("record is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(CommandError::Usage("record must be a JSON object".to_string()));
    }
    serde_json::from_value(value)
        .map_err(|e| CommandError::Usage(format!("record does not fit {}: {e}", S::KIND)))
}

/// Backend response plus the re-fetched list, or the re-fetch failure.
fn outcome_json<R: serde::Serialize>(outcome: MutationOutcome<R>) -> Result<Value, CommandError> {
    let refreshed = match &outcome.refreshed {
        Ok(page) => to_json(page)?,
        Err(err) => {
            warn!(error = %err, "list could not be refreshed");
            json!({ "error": err.user_message() })
        }
    };
    Ok(json!({ "response": outcome.response, "refreshed": refreshed }))
}

fn not_a_record(kind: ResourceKind) -> CommandError {
    let hint = match kind {
        ResourceKind::CarStocks => "use `car-stock <rep>`",
        _ => "use `dashboard`",
    };
    CommandError::Usage(format!("{kind} is not a record resource; {hint}"))
}
