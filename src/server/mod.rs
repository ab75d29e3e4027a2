//! Development transport: drives the session core over plain TCP.

pub mod listener;
pub mod tcp;
