use super::event_intent::EventIntent;

pub const PURCHASE_EVENT: &str = "purchase";
const PURCHASE_DESCRIPTION: &str = "Bash Purchase";

/// Order totals as reported by checkout, in cents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderTotals {
    pub order_id: Option<String>,
    pub order_total_cents: Option<i64>,
    pub shipping_cents: Option<i64>,
}

pub fn purchase_intent(totals: &OrderTotals) -> EventIntent {
    EventIntent::new(PURCHASE_EVENT)
        .with_value(cents_to_rand(totals.order_total_cents))
        .with_shipping(cents_to_rand(totals.shipping_cents))
        .with_transaction_id(totals.order_id.clone().unwrap_or_default())
        .with_event_description(PURCHASE_DESCRIPTION)
}

fn cents_to_rand(cents: Option<i64>) -> f64 {
    cents.map_or(0.0, |c| c as f64 / 100.0)
}
