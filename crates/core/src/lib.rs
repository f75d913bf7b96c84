//! SquareGate core: the HTTP surface, the gateway operations behind it, and
//! the result normalizer they share.

pub mod amount;
pub mod api;
pub mod gateway;
pub mod normalize;
pub mod pagination;

pub use api::{create_router, start_server};
pub use gateway::{DEFAULT_CURRENCY, GatewayError, GatewayState, Listing};
pub use normalize::{NormalizeError, NormalizeRequest, normalize};
pub use pagination::{PaginationError, prepare_pagination_parameters};
