//! Request execution layer.

pub mod http;
