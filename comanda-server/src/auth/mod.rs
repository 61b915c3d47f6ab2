//! Authentication middleware and token handling

pub mod account_auth;
