//! Request middleware: session decoding and the access-control gate.

pub mod access;
pub mod session;
