//! Data models for RoomLedger

pub mod dates;
pub mod hotel;
pub mod inventory;
pub mod reservation;
pub mod room_type;

// Re-export commonly used types
pub use hotel::Hotel;
pub use inventory::{InventoryDay, InventoryView};
pub use reservation::{ReservationDetails, ReservationStatus};
pub use room_type::RoomType;
