//! Room type administration service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::room_type::{AssignRoomTypes, AssignRoomTypesResult, CreateRoomType, RoomType, UpdateRoomType},
    repository::Repository,
};

#[derive(Clone)]
pub struct RoomTypesService {
    repository: Repository,
}

impl RoomTypesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<RoomType>> {
        self.repository.room_types.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<RoomType> {
        self.repository.room_types.get_by_id(id).await
    }

    pub async fn list_by_hotel(&self, hotel_id: i32) -> AppResult<Vec<RoomType>> {
        self.repository.room_types.list_by_hotel(hotel_id).await
    }

    pub async fn create(&self, data: &CreateRoomType) -> AppResult<RoomType> {
        data.validate()?;
        self.repository.hotels.get_by_id(data.hotel_id).await?;
        self.repository.room_types.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateRoomType) -> AppResult<RoomType> {
        data.validate()?;
        self.repository.room_types.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.room_types.delete(id).await
    }

    /// Move existing room types under another hotel
    pub async fn assign_to_hotel(&self, data: &AssignRoomTypes) -> AppResult<AssignRoomTypesResult> {
        if data.room_type_ids.is_empty() {
            return Err(AppError::Validation(
                "At least one room type must be specified".to_string(),
            ));
        }

        self.repository.hotels.get_by_id(data.hotel_id).await?;

        let assigned = self
            .repository
            .room_types
            .assign_to_hotel(data.hotel_id, &data.room_type_ids)
            .await?;
        if assigned.is_empty() {
            return Err(AppError::NotFound(
                "No room types found for the given ids".to_string(),
            ));
        }

        tracing::info!("Assigned room types {:?} to hotel {}", assigned, data.hotel_id);
        Ok(AssignRoomTypesResult {
            message: "Room types assigned".to_string(),
            hotel_id: data.hotel_id,
            assigned_room_type_ids: assigned,
        })
    }
}
