//! API integration tests against a running server

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5000/api";

/// Create an active hotel with one room type, returning their ids
async fn create_hotel_with_room_type(client: &Client) -> (i64, i64) {
    let hotel: Value = client
        .post(format!("{}/hotels", BASE_URL))
        .json(&json!({
            "nombre": "Hotel Prueba Integración",
            "direccion": "Avenida de la Prueba 1",
            "categoria": 3,
            "estado": true
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let hotel_id = hotel["id"].as_i64().expect("No hotel id");

    let room_type: Value = client
        .post(format!("{}/roomtypes", BASE_URL))
        .json(&json!({
            "nombre": "Doble",
            "precioBase": 100.0,
            "hotelId": hotel_id
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let room_type_id = room_type["id"].as_i64().expect("No room type id");

    (hotel_id, room_type_id)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_hotels_paged() {
    let client = Client::new();

    let response = client
        .get(format!("{}/hotels/paged?pageNumber=1&pageSize=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert_eq!(body["pageSize"], 5);
    assert_eq!(body["hasPreviousPage"], false);
}

#[tokio::test]
#[ignore]
async fn test_hotels_paged_rejects_page_zero() {
    let client = Client::new();

    let response = client
        .get(format!("{}/hotels/paged?pageNumber=0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_get_nonexistent_hotel() {
    let client = Client::new();

    let response = client
        .get(format!("{}/hotels/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_bulk_inventory_then_book() {
    let client = Client::new();
    let (hotel_id, room_type_id) = create_hotel_with_room_type(&client).await;

    let start = (Utc::now() + Duration::days(10)).date_naive();
    let end = start + Duration::days(3);

    let created: Value = client
        .post(format!("{}/inventory/bulk", BASE_URL))
        .json(&json!({
            "hotelId": hotel_id,
            "roomTypeId": room_type_id,
            "fechaInicio": start.to_string(),
            "fechaFin": end.to_string(),
            "cantidadTotal": 10
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(created.as_array().map(|rows| rows.len()), Some(3));

    // a second run creates nothing
    let again: Value = client
        .post(format!("{}/inventory/bulk", BASE_URL))
        .json(&json!({
            "hotelId": hotel_id,
            "roomTypeId": room_type_id,
            "fechaInicio": start.to_string(),
            "fechaFin": end.to_string(),
            "cantidadTotal": 10
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(again.as_array().map(|rows| rows.len()), Some(0));

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .json(&json!({
            "hotelId": hotel_id,
            "roomTypeId": room_type_id,
            "huespedNombre": "Elena Prueba",
            "fechaEntrada": start.to_string(),
            "fechaSalida": end.to_string(),
            "cantidadHabitaciones": 2
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["reservation"]["montoTotal"], 600.0);
    assert_eq!(body["reservation"]["estado"], "Confirmed");

    let availability: Value = client
        .post(format!("{}/inventory/check-availability", BASE_URL))
        .json(&json!({
            "hotelId": hotel_id,
            "roomTypeId": room_type_id,
            "fechaInicio": start.to_string(),
            "fechaFin": end.to_string(),
            "cantidadHabitaciones": 9
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(availability["available"], false);
}

#[tokio::test]
#[ignore]
async fn test_same_day_checkout_is_rejected() {
    let client = Client::new();
    let (hotel_id, room_type_id) = create_hotel_with_room_type(&client).await;
    let day = (Utc::now() + Duration::days(5)).date_naive();

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .json(&json!({
            "hotelId": hotel_id,
            "roomTypeId": room_type_id,
            "huespedNombre": "Elena Prueba",
            "fechaEntrada": day.to_string(),
            "fechaSalida": day.to_string(),
            "cantidadHabitaciones": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "The exit date must be after the entry date");
}

#[tokio::test]
#[ignore]
async fn test_cancel_unknown_reservation() {
    let client = Client::new();

    let response = client
        .post(format!("{}/reservations/999999/cancel", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_last_room_is_sold_once() {
    let client = Client::new();
    let (hotel_id, room_type_id) = create_hotel_with_room_type(&client).await;

    let check_in = (Utc::now() + Duration::days(20)).date_naive();
    let check_out = check_in + Duration::days(1);

    let response = client
        .post(format!("{}/inventory", BASE_URL))
        .json(&json!({
            "hotelId": hotel_id,
            "roomTypeId": room_type_id,
            "fecha": check_in.to_string(),
            "cantidadTotal": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let attempts: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            let body = json!({
                "hotelId": hotel_id,
                "roomTypeId": room_type_id,
                "huespedNombre": format!("Huésped {}", i),
                "fechaEntrada": check_in.to_string(),
                "fechaSalida": check_out.to_string(),
                "cantidadHabitaciones": 1
            });
            tokio::spawn(async move {
                client
                    .post(format!("{}/reservations", BASE_URL))
                    .json(&body)
                    .send()
                    .await
                    .expect("Failed to send request")
                    .status()
            })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        let status = attempt.await.expect("Request task failed");
        if status == 201 {
            created += 1;
        } else {
            assert_eq!(status, 400);
        }
    }
    assert_eq!(created, 1);

    let ledger: Value = client
        .get(format!(
            "{}/inventory/hotel/{}/roomtype/{}?fechaInicio={}&fechaFin={}",
            BASE_URL, hotel_id, room_type_id, check_in, check_out
        ))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(ledger[0]["cantidadReservada"], 1);
    assert_eq!(ledger[0]["cantidadDisponible"], 0);
}

#[tokio::test]
#[ignore]
async fn test_hotels_paged_rejects_oversized_page() {
    let client = Client::new();

    let response = client
        .get(format!("{}/hotels/paged?pageSize=9223372036854775807", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
