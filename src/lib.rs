// API client and test support for the hotel-booking REST service

pub mod assertions;
pub mod auth;
pub mod booking;
pub mod config;
pub mod fixtures;
pub mod health;
pub mod http;
pub mod retry;
pub mod session;
pub mod types;

// Re-export key types for convenience
pub use auth::{AuthClient, AuthError, TokenCache};
pub use booking::{BookingClient, BookingError};
pub use config::{AuthRetryConfig, ClientConfig, ClientError};
pub use health::HealthClient;
pub use http::{
    ApiError, ApiRequest, ApiResponse, HttpClient, RawResponse, RequestOptions, ReqwestTransport,
    Transport,
};
pub use retry::{BackoffStrategy, LinearBackoff, NoBackoff};
pub use session::ApiSession;
pub use types::{
    Booking, BookingDates, BookingFilters, BookingId, BookingResponse, Credentials,
    PartialBookingDates, PartialBookingUpdate, PartialCredentials, TokenResponse,
};
