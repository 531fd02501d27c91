//! Read-only overview commands

use serde_json::{json, Value};

use super::{to_json, CommandError};
use crate::context::AppContext;

pub async fn stats(ctx: &AppContext) -> Result<Value, CommandError> {
    let stats = ctx.dashboard().stats().await?;
    to_json(&stats)
}

/// Stock lines with a `display_name` resolved from the nested product.
pub async fn car_stock(ctx: &AppContext, rep: &str) -> Result<Value, CommandError> {
    let items = ctx.car_stock().for_rep(rep).await?;

    let mut lines = Vec::with_capacity(items.len());
    for item in &items {
        let mut line = to_json(item)?;
        if let (Value::Object(map), Some(name)) = (&mut line, item.display_name()) {
            map.entry("display_name").or_insert_with(|| json!(name));
        }
        lines.push(line);
    }
    Ok(Value::Array(lines))
}
