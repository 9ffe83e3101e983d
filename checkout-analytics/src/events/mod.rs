pub mod event_intent;
pub mod event_normalizer;
pub mod normalized_event;
pub mod purchase_tracking;
pub mod transport_event;

pub use event_intent::{truncate_string, EventIntent};
pub use event_normalizer::{EventNormalizer, TransportContext};
pub use normalized_event::{
    EcommerceDetails, EcommerceEvent, EventParams, GenericTagEvent, NormalizedEvent, CURRENCY,
    GA_EVENT,
};
pub use purchase_tracking::{purchase_intent, OrderTotals};
pub use transport_event::TransportEvent;
