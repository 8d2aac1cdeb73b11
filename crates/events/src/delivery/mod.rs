//! Delivery channels for reservation notifications.
//!
//! Only a logging email stand-in exists; there is no real transport.

pub mod email;
