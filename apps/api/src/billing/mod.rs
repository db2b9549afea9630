// Subscription plans, the upload gate, and Stripe Checkout integration.
// All Stripe calls go through `stripe::PaymentGateway`.

pub mod gate;
pub mod handlers;
pub mod plans;
pub mod store;
pub mod stripe;
