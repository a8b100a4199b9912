//! API handlers for RoomLedger REST endpoints

pub mod health;
pub mod hotels;
pub mod inventory;
pub mod openapi;
pub mod reservations;
pub mod room_types;
