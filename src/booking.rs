// Booking resource client
// Reads and creates are public; PUT, PATCH and DELETE carry the session
// cookie obtained from the auth client on every call.

use futures::future::join_all;
use reqwest::header::HeaderMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::{AuthClient, AuthError};
use crate::http::{ApiError, ApiResponse, HttpClient, RawResponse, RequestOptions};
use crate::types::{Booking, BookingFilters, BookingId, BookingResponse, PartialBookingUpdate};

pub const BOOKING_ENDPOINT: &str = "/booking";

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub fn booking_path(booking_id: u64) -> String {
    format!("{}/{}", BOOKING_ENDPOINT, booking_id)
}

#[derive(Clone)]
pub struct BookingClient {
    http: HttpClient,
    auth: AuthClient,
}

impl BookingClient {
    pub fn new(http: HttpClient, auth: AuthClient) -> Self {
        Self { http, auth }
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub async fn get_all_booking_ids(
        &self,
        filters: Option<&BookingFilters>,
    ) -> Result<ApiResponse<Vec<BookingId>>, ApiError> {
        let params = filters.map(BookingFilters::to_query).unwrap_or_default();
        self.http
            .get(BOOKING_ENDPOINT, RequestOptions::with_params(params))
            .await
    }

    // 404 for unknown ids comes back as a normal response
    pub async fn get_booking(&self, booking_id: u64) -> Result<ApiResponse<Booking>, ApiError> {
        self.http
            .get(&booking_path(booking_id), RequestOptions::default())
            .await
    }

    pub async fn create_booking(
        &self,
        booking: &Booking,
    ) -> Result<ApiResponse<BookingResponse>, ApiError> {
        let result: ApiResponse<BookingResponse> = self
            .http
            .post(BOOKING_ENDPOINT, booking, RequestOptions::default())
            .await?;
        debug!(
            status = result.status().as_u16(),
            booking_id = result.data.bookingid,
            "created booking"
        );
        Ok(result)
    }

    // Full replacement: fields missing from `booking` are not kept.
    pub async fn update_booking(
        &self,
        booking_id: u64,
        booking: &Booking,
    ) -> Result<ApiResponse<Booking>, BookingError> {
        let options = self.authorized().await?;
        Ok(self.http.put(&booking_path(booking_id), booking, options).await?)
    }

    pub async fn partial_update_booking(
        &self,
        booking_id: u64,
        patch: &PartialBookingUpdate,
    ) -> Result<ApiResponse<Booking>, BookingError> {
        let options = self.authorized().await?;
        Ok(self.http.patch(&booking_path(booking_id), patch, options).await?)
    }

    pub async fn delete_booking(&self, booking_id: u64) -> Result<RawResponse, BookingError> {
        let options = self.authorized().await?;
        let response = self.http.delete(&booking_path(booking_id), options).await?;
        debug!(booking_id, status = response.status().as_u16(), "deleted booking");
        Ok(response)
    }

    // Creates all bookings concurrently; results keep the input order
    pub async fn create_bookings(
        &self,
        bookings: &[Booking],
    ) -> Vec<Result<ApiResponse<BookingResponse>, ApiError>> {
        join_all(bookings.iter().map(|booking| self.create_booking(booking))).await
    }

    // Best-effort cleanup. Returns how many deletes the service accepted.
    pub async fn delete_bookings(&self, booking_ids: &[u64]) -> usize {
        let results = join_all(booking_ids.iter().map(|id| self.delete_booking(*id))).await;
        results
            .into_iter()
            .zip(booking_ids)
            .filter(|(result, booking_id)| match result {
                Ok(response) if response.ok() => true,
                Ok(response) => {
                    warn!(
                        booking_id,
                        status = response.status().as_u16(),
                        "cleanup delete rejected"
                    );
                    false
                }
                Err(err) => {
                    warn!(booking_id, error = %err, "cleanup delete failed");
                    false
                }
            })
            .count()
    }

    async fn authorized(&self) -> Result<RequestOptions, AuthError> {
        let headers: HeaderMap = self.auth.auth_headers().await?;
        Ok(RequestOptions::with_headers(headers))
    }
}
