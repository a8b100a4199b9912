//! Demo data for an empty database

use chrono::{Datelike, Duration, Utc, Weekday};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::Decimal;

use super::{BookingStore, Repository};
use crate::{
    error::AppResult,
    models::{
        hotel::HotelInput,
        inventory::nights_between,
        reservation::NewReservation,
        room_type::{CreateRoomType, RoomType},
    },
};

const HOTELS: &[(&str, &str, i16, bool)] = &[
    ("Hotel Ritz Madrid", "Plaza de la Lealtad, 5, 28014 Madrid", 5, true),
    ("Hotel Marriott Barcelona", "Avinguda Diagonal, 250, 08029 Barcelona", 5, true),
    ("Hotel NH Collection Valencia", "Calle de Xativa, 14, 46004 Valencia", 4, true),
    ("Hotel AC Malaga", "Calle Cortina del Muelle, 1, 29015 Malaga", 4, true),
    ("Hotel Tryp Sevilla", "Av. de la Constitucion, 13, 41004 Sevilla", 4, true),
    ("Hotel Casa del Poeta", "Calle de los Reyes Catolicos, 4, 18009 Granada", 3, true),
    ("Hotel Zenit Conde de Orgaz", "Calle del Conde de Orgaz, 5, 28027 Madrid", 3, false),
];

const GUESTS: &[&str] = &[
    "Juan Perez Garcia",
    "Maria Gonzalez Lopez",
    "Carlos Ramirez Martinez",
    "Ana Fernandez Sanchez",
    "Luis Torres Diaz",
    "Laura Jimenez Ruiz",
];

/// Room type names and price multipliers (per star) offered at each category
fn room_catalog(category: i16) -> &'static [(&'static str, i64)] {
    match category {
        5 => &[
            ("Standard", 60),
            ("Superior", 90),
            ("Junior Suite", 180),
            ("Executive Suite", 250),
            ("Presidential Suite", 400),
        ],
        4 => &[("Single", 50), ("Double", 75), ("Triple", 100), ("Suite", 150)],
        _ => &[("Single", 40), ("Double", 60), ("Family", 85)],
    }
}

fn capacity(room_type: &str) -> i32 {
    match room_type {
        "Standard" | "Single" => 15,
        "Superior" | "Double" => 20,
        "Triple" | "Family" => 12,
        "Junior Suite" => 8,
        "Executive Suite" => 5,
        "Presidential Suite" => 2,
        "Suite" => 6,
        _ => 10,
    }
}

impl Repository {
    /// Populate hotels, room types, inventory for the next `inventory_days`
    /// days and a handful of reservations. Does nothing unless the hotels
    /// table is empty. Returns whether data was written.
    pub async fn seed_if_empty(&self, inventory_days: u32) -> AppResult<bool> {
        if self.hotels.count().await? > 0 {
            return Ok(false);
        }

        let mut rng = StdRng::seed_from_u64(42);
        let today = Utc::now().date_naive();
        let mut room_types: Vec<RoomType> = Vec::new();

        for (name, address, category, active) in HOTELS {
            let hotel = self
                .hotels
                .create(&HotelInput {
                    name: name.to_string(),
                    address: address.to_string(),
                    category: *category,
                    active: *active,
                })
                .await?;

            for (room_name, multiplier) in room_catalog(*category) {
                let room_type = self
                    .room_types
                    .create(&CreateRoomType {
                        name: room_name.to_string(),
                        base_price: Decimal::from(multiplier * i64::from(*category)),
                        hotel_id: hotel.id,
                    })
                    .await?;
                room_types.push(room_type);
            }
        }

        let mut rows = 0usize;
        for room_type in &room_types {
            let total = capacity(&room_type.name);
            for offset in 0..i64::from(inventory_days) {
                let day = today + Duration::days(offset);
                let row = self.inventory.insert(room_type.hotel_id, room_type.id, day, total).await?;
                rows += 1;

                // Weekends and the coming week run fuller
                let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
                let (low, high) = match (offset < 7, weekend) {
                    (true, true) => (0.6, 0.8),
                    (true, false) => (0.3, 0.5),
                    (false, true) => (0.2, 0.4),
                    (false, false) => (0.05, 0.2),
                };
                let occupied = rng.gen_range((f64::from(total) * low) as i32..=(f64::from(total) * high) as i32);
                if occupied > 0 {
                    self.inventory.adjust_reserved(row.id, occupied.min(total)).await?;
                }
            }
        }

        let mut booked = 0usize;
        for guest in GUESTS {
            let room_type = &room_types[rng.gen_range(0..room_types.len())];
            let lead = rng.gen_range(0..i64::from(inventory_days.saturating_sub(5).max(1)));
            let check_in = today + Duration::days(lead);
            let check_out = check_in + Duration::days(rng.gen_range(2..=4));
            let rooms = 1;

            let reservation = NewReservation {
                hotel_id: room_type.hotel_id,
                room_type_id: room_type.id,
                guest_name: guest.to_string(),
                check_in,
                check_out,
                rooms,
                total_amount: room_type.base_price * Decimal::from(nights_between(check_in, check_out)) * Decimal::from(rooms),
                created_at: Utc::now(),
            };
            if self.commit_reservation(&reservation).await?.is_some() {
                booked += 1;
            }
        }

        tracing::info!(
            "Seeded {} hotels, {} room types, {} inventory days, {} reservations",
            HOTELS.len(),
            room_types.len(),
            rows,
            booked
        );
        Ok(true)
    }
}
