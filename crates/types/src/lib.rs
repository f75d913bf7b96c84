//! Wire types shared by the SquareGate crates.
//!
//! `square` holds the provider-facing shapes (money, error objects,
//! environments) and `envelope` the JSON body every gateway route answers
//! with.

pub mod envelope;
pub mod square;

pub use envelope::Envelope;
pub use square::{Environment, Money, SquareError, UnknownEnvironment};
