//! Checkout: order summaries and the WhatsApp handoff.

mod handoff;
mod order;

pub use handoff::{whatsapp_handoff, CheckoutConfig, Handoff, DEFAULT_BASE_URL, DEFAULT_GREETING};
pub use order::{OrderLine, OrderSummary};
