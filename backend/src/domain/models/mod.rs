//! Domain models for the campus ledger.

pub mod attendance;
pub mod fee;
pub mod leave;
pub mod mark;
pub mod qr_session;
pub mod student;
