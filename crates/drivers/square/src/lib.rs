//! Minimal Square REST client used by the gateway.
//!
//! Covers the locations, customers, cards, payments and refunds endpoints.
//! Request bodies are accepted in the camelCase shape the gateway's callers
//! use and translated to Square's snake_case wire format; results come back
//! camelCased (see [`case`]).

pub mod case;
mod client;
mod config;
mod error;
mod requests;

pub use client::{ListPage, SquareClient};
pub use config::{DEFAULT_SQUARE_VERSION, SquareConfig};
pub use error::SquareClientError;
pub use requests::{
    CancelPaymentByIdempotencyKeyRequest, CreatePaymentRequest, PaymentAmountUpdate,
    UpdatePaymentRequest,
};

/// Square query keys for `GET /v2/payments`, in positional order.
pub const PAYMENT_LIST_QUERY: [&str; 12] = [
    "begin_time",
    "end_time",
    "sort_order",
    "cursor",
    "location_id",
    "total",
    "last_4",
    "card_brand",
    "limit",
    "is_offline_payment",
    "offline_begin_time",
    "offline_end_time",
];

/// Square query keys for `GET /v2/customers`, in positional order.
pub const CUSTOMER_LIST_QUERY: [&str; 5] = ["cursor", "limit", "sort_field", "sort_order", "count"];

/// Square query keys for `GET /v2/cards`, in positional order.
pub const CARD_LIST_QUERY: [&str; 5] = [
    "cursor",
    "customer_id",
    "include_disabled",
    "reference_id",
    "sort_order",
];
