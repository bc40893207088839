// Test data builders for credentials and bookings
// Booking dates are computed relative to today (UTC) unless fixed.

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

use crate::types::{Booking, BookingDates, Credentials, PartialBookingUpdate, PartialCredentials};

// Overrides use the same sparse shape as a PATCH body
pub type BookingOverrides = PartialBookingUpdate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn valid_credentials() -> Credentials {
    Credentials::new("admin", "password123")
}

pub fn invalid_credentials() -> Credentials {
    Credentials::new("invalid_user", "wrong_password")
}

pub fn empty_credentials() -> Credentials {
    Credentials::new("", "")
}

// SQL injection attempt
pub fn special_char_credentials() -> Credentials {
    Credentials::new("admin'--", "' OR '1'='1")
}

pub fn long_credentials() -> Credentials {
    Credentials::new("a".repeat(1000), "b".repeat(1000))
}

pub fn username_only() -> PartialCredentials {
    PartialCredentials {
        username: Some("admin".to_string()),
        password: None,
    }
}

pub fn password_only() -> PartialCredentials {
    PartialCredentials {
        username: None,
        password: Some("password123".to_string()),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

// John Doe, checking in a week from today for three nights.
pub fn valid_booking() -> Booking {
    let checkin = days_from_today(7);
    let checkout = checkin + Duration::days(3);

    Booking {
        firstname: "John".to_string(),
        lastname: "Doe".to_string(),
        totalprice: 150.0,
        depositpaid: true,
        bookingdates: BookingDates::new(format_date(checkin), format_date(checkout)),
        additionalneeds: Some("Breakfast".to_string()),
    }
}

pub fn valid_booking_with(overrides: &BookingOverrides) -> Booking {
    overrides.apply_to(&valid_booking())
}

// Required fields only, fixed dates
pub fn minimal_booking() -> Booking {
    Booking {
        firstname: "Jane".to_string(),
        lastname: "Smith".to_string(),
        totalprice: 100.0,
        depositpaid: false,
        bookingdates: BookingDates::new("2024-01-01", "2024-01-05"),
        additionalneeds: None,
    }
}

pub fn booking_with_special_chars() -> Booking {
    Booking {
        firstname: "María José".to_string(),
        lastname: "O'Connor-Smith".to_string(),
        additionalneeds: Some("Café & Croissant".to_string()),
        ..valid_booking()
    }
}

pub fn booking_with_max_values() -> Booking {
    Booking {
        firstname: "A".repeat(50),
        lastname: "B".repeat(50),
        totalprice: 999999.0,
        additionalneeds: Some("Special request: ".repeat(20)),
        ..valid_booking()
    }
}

pub fn multiple_bookings(count: usize) -> Vec<Booking> {
    (0..count)
        .map(|index| Booking {
            firstname: format!("Guest{}", index + 1),
            lastname: format!("Test{}", index + 1),
            totalprice: 100.0 + index as f64 * 50.0,
            ..valid_booking()
        })
        .collect()
}

// Name that no other run is likely to have used, for filter lookups
pub fn unique_name(prefix: &str) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{}{}{}", prefix, Utc::now().timestamp_millis(), suffix)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScenario {
    BusinessTrip,
    FamilyVacation,
    LastMinute,
    LongStay,
}

impl BookingScenario {
    pub const ALL: [BookingScenario; 4] = [
        BookingScenario::BusinessTrip,
        BookingScenario::FamilyVacation,
        BookingScenario::LastMinute,
        BookingScenario::LongStay,
    ];

    pub fn booking(self) -> Booking {
        match self {
            BookingScenario::BusinessTrip => Booking {
                totalprice: 350.0,
                additionalneeds: Some("Late checkout, WiFi, Parking".to_string()),
                ..valid_booking()
            },
            BookingScenario::FamilyVacation => Booking {
                totalprice: 500.0,
                depositpaid: true,
                additionalneeds: Some("Extra bed, Crib, Breakfast for 4".to_string()),
                ..valid_booking()
            },
            BookingScenario::LastMinute => Booking {
                totalprice: 200.0,
                bookingdates: BookingDates::new(
                    format_date(today()),
                    format_date(days_from_today(1)),
                ),
                ..valid_booking()
            },
            BookingScenario::LongStay => Booking {
                totalprice: 3000.0,
                bookingdates: BookingDates::new(
                    format_date(days_from_today(7)),
                    format_date(days_from_today(37)),
                ),
                additionalneeds: Some("Monthly cleaning, Kitchen access".to_string()),
                ..valid_booking()
            },
        }
    }
}
