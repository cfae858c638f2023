//! Storage layer: abstraction traits plus the in-memory backend.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{
    AttendanceStorage, FeeStorage, LeaveStorage, MarkStorage, QrSessionStorage, StudentStorage,
};
