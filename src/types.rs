// Wire types for the booking service
// Field names follow the service's JSON exactly (lowercase, no separators)

use serde::{Deserialize, Serialize};

// Login pair sent to POST /auth
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Credentials with fields left out entirely, for malformed login attempts
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PartialCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// Body of POST /auth. The service answers 200 either way: `token` on
// success, `reason` when the credentials were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TokenResponse {
    // The token, if the service issued a non-empty one.
    pub fn issued_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct BookingDates {
    pub checkin: String,
    pub checkout: String,
}

impl BookingDates {
    pub fn new(checkin: impl Into<String>, checkout: impl Into<String>) -> Self {
        Self {
            checkin: checkin.into(),
            checkout: checkout.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: f64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

// Body of POST /booking
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct BookingResponse {
    pub bookingid: u64,
    pub booking: Booking,
}

// One element of GET /booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct BookingId {
    pub bookingid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PartialBookingDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<String>,
}

// Sparse PATCH body. Absent fields are left out of the JSON so the service
// keeps their current values.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PartialBookingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totalprice: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depositpaid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookingdates: Option<PartialBookingDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

impl PartialBookingUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // Applies the patch to a local copy, mirroring what the service does.
    pub fn apply_to(&self, booking: &Booking) -> Booking {
        let mut patched = booking.clone();
        if let Some(firstname) = &self.firstname {
            patched.firstname = firstname.clone();
        }
        if let Some(lastname) = &self.lastname {
            patched.lastname = lastname.clone();
        }
        if let Some(totalprice) = self.totalprice {
            patched.totalprice = totalprice;
        }
        if let Some(depositpaid) = self.depositpaid {
            patched.depositpaid = depositpaid;
        }
        if let Some(dates) = &self.bookingdates {
            if let Some(checkin) = &dates.checkin {
                patched.bookingdates.checkin = checkin.clone();
            }
            if let Some(checkout) = &dates.checkout {
                patched.bookingdates.checkout = checkout.clone();
            }
        }
        if let Some(needs) = &self.additionalneeds {
            patched.additionalneeds = Some(needs.clone());
        }
        patched
    }
}

// Query filters for GET /booking
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingFilters {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
}

impl BookingFilters {
    pub fn by_firstname(firstname: impl Into<String>) -> Self {
        Self {
            firstname: Some(firstname.into()),
            ..Default::default()
        }
    }

    pub fn by_lastname(lastname: impl Into<String>) -> Self {
        Self {
            lastname: Some(lastname.into()),
            ..Default::default()
        }
    }

    // Present filters as (name, value) pairs, in a stable order
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("firstname", &self.firstname),
            ("lastname", &self.lastname),
            ("checkin", &self.checkin),
            ("checkout", &self.checkout),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect()
    }
}
