//! Hotel administration service

use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::hotel::{Hotel, HotelInput, HotelPageQuery},
    repository::Repository,
};

/// One page of a hotel search
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelPage {
    pub items: Vec<Hotel>,
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl HotelPage {
    /// `page_size` must be at least 1
    pub fn new(items: Vec<Hotel>, total_count: i64, page_number: i64, page_size: i64) -> Self {
        let total_pages = if total_count > 0 {
            (total_count - 1) / page_size + 1
        } else {
            0
        };
        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: page_number < total_pages,
        }
    }
}

/// Largest page a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Resolve paging parameters to `(limit, offset)`
pub fn page_window(page_number: i64, page_size: i64) -> AppResult<(i64, i64)> {
    if page_number < 1 || page_size < 1 {
        return Err(AppError::Validation(
            "Page number and page size must be greater than 0".to_string(),
        ));
    }
    if page_size > MAX_PAGE_SIZE {
        return Err(AppError::Validation(format!(
            "Page size cannot exceed {}",
            MAX_PAGE_SIZE
        )));
    }
    let offset = (page_number - 1)
        .checked_mul(page_size)
        .ok_or_else(|| AppError::Validation("Page number is out of range".to_string()))?;
    Ok((page_size, offset))
}

#[derive(Clone)]
pub struct HotelsService {
    repository: Repository,
}

impl HotelsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Hotel>> {
        self.repository.hotels.list().await
    }

    pub async fn list_active(&self) -> AppResult<Vec<Hotel>> {
        self.repository.hotels.list_active().await
    }

    pub async fn page(&self, query: &HotelPageQuery) -> AppResult<HotelPage> {
        let page_number = query.page_number.unwrap_or(1);
        let page_size = query.page_size.unwrap_or(10);
        let (limit, offset) = page_window(page_number, page_size)?;

        let (items, total) = self
            .repository
            .hotels
            .page(query.search_term.as_deref(), limit, offset)
            .await?;
        Ok(HotelPage::new(items, total, page_number, page_size))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Hotel> {
        self.repository.hotels.get_by_id(id).await
    }

    pub async fn create(&self, data: &HotelInput) -> AppResult<Hotel> {
        data.validate()?;
        let hotel = self.repository.hotels.create(data).await?;
        tracing::info!("Created hotel {} ({})", hotel.id, hotel.name);
        Ok(hotel)
    }

    pub async fn update(&self, id: i32, data: &HotelInput) -> AppResult<Hotel> {
        data.validate()?;
        self.repository.hotels.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.hotels.delete(id).await?;
        tracing::info!("Deleted hotel {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_arithmetic() {
        let page = HotelPage::new(Vec::new(), 21, 2, 10);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous_page);
        assert!(page.has_next_page);

        let last = HotelPage::new(Vec::new(), 20, 2, 10);
        assert_eq!(last.total_pages, 2);
        assert!(!last.has_next_page);

        let empty = HotelPage::new(Vec::new(), 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_previous_page);
        assert!(!empty.has_next_page);
    }

    #[test]
    fn test_page_count_does_not_overflow() {
        let page = HotelPage::new(Vec::new(), 5, 1, i64::MAX);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page);

        let full = HotelPage::new(Vec::new(), i64::MAX, 1, 1);
        assert_eq!(full.total_pages, i64::MAX);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10).unwrap(), (10, 0));
        assert_eq!(page_window(3, 25).unwrap(), (25, 50));
        assert!(matches!(page_window(0, 10), Err(AppError::Validation(_))));
        assert!(matches!(page_window(1, 0), Err(AppError::Validation(_))));
        assert!(matches!(page_window(1, i64::MAX), Err(AppError::Validation(_))));
        assert!(matches!(page_window(i64::MAX, MAX_PAGE_SIZE), Err(AppError::Validation(_))));
    }
}
