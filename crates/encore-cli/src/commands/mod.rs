pub mod account;
pub mod cart;
pub mod checkout;
pub mod context;
pub mod events;
pub mod login;
