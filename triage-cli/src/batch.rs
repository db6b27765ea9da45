use anyhow::Context;
use triage_core::Order;
use triage_order::OrderProcessor;

/// Run one batch and render a summary row per evaluated order.
///
/// Rows come from the orders the processor hands back, so outcomes the store
/// never accepted (`db_error`) still show up with their computed priority.
pub async fn run_batch(processor: &OrderProcessor, user_id: i64) -> anyhow::Result<Vec<String>> {
    let orders = processor
        .process_batch(user_id)
        .await
        .with_context(|| format!("Batch for user {} was not processed", user_id))?;

    Ok(orders.iter().map(summary_line).collect())
}

pub fn summary_line(order: &Order) -> String {
    format!(
        "{:>6}  {:<4} {:>12}  {:<14} {}",
        order.id,
        order.category.as_deref().unwrap_or("-"),
        order.amount,
        order.status,
        order.priority,
    )
}
