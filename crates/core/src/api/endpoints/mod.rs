pub mod cards;
pub mod customers;
pub mod locations;
pub mod payments;
