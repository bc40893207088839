// Assertion helpers for API tests. Each one panics with a message naming
// the expected and actual values.

use std::time::Duration;

use chrono::NaiveDate;

use crate::fixtures::DATE_FORMAT;
use crate::http::RawResponse;
use crate::types::{Booking, BookingResponse};

#[track_caller]
pub fn assert_status_code(response: &RawResponse, expected: u16) {
    let actual = response.status().as_u16();
    assert_eq!(
        actual, expected,
        "Expected status {} but got {}",
        expected, actual
    );
}

#[track_caller]
pub fn assert_success_response(response: &RawResponse) {
    assert!(
        response.ok(),
        "Expected success response but got {}",
        response.status()
    );
}

#[track_caller]
pub fn assert_client_error(response: &RawResponse) {
    assert!(
        response.status().is_client_error(),
        "Expected client error (4xx) but got {}",
        response.status()
    );
}

// additionalneeds is only compared when the expected booking sets it
#[track_caller]
pub fn assert_booking_equals(actual: &Booking, expected: &Booking) {
    assert_eq!(actual.firstname, expected.firstname, "firstname differs");
    assert_eq!(actual.lastname, expected.lastname, "lastname differs");
    assert_eq!(actual.totalprice, expected.totalprice, "totalprice differs");
    assert_eq!(actual.depositpaid, expected.depositpaid, "depositpaid differs");
    assert_eq!(
        actual.bookingdates.checkin, expected.bookingdates.checkin,
        "checkin differs"
    );
    assert_eq!(
        actual.bookingdates.checkout, expected.bookingdates.checkout,
        "checkout differs"
    );
    if expected.additionalneeds.is_some() {
        assert_eq!(
            actual.additionalneeds, expected.additionalneeds,
            "additionalneeds differs"
        );
    }
}

#[track_caller]
pub fn assert_valid_booking_response(response: &BookingResponse) {
    assert!(
        response.bookingid > 0,
        "Expected a positive booking id but got {}",
        response.bookingid
    );
    assert_valid_booking_structure(&response.booking);
}

#[track_caller]
pub fn assert_valid_booking_structure(booking: &Booking) {
    assert!(!booking.firstname.is_empty(), "firstname is missing");
    assert!(!booking.lastname.is_empty(), "lastname is missing");
    assert!(
        booking.totalprice.is_finite(),
        "totalprice is not a number: {}",
        booking.totalprice
    );
    for (field, value) in [
        ("checkin", &booking.bookingdates.checkin),
        ("checkout", &booking.bookingdates.checkout),
    ] {
        assert!(
            NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok(),
            "{} is not a {} date: {:?}",
            field,
            DATE_FORMAT,
            value
        );
    }
}

// Uses the service's x-response-time header when it sends one, otherwise
// the time measured by the transport.
#[track_caller]
pub fn assert_response_time(response: &RawResponse, max: Duration) {
    let reported = response
        .header("x-response-time")
        .and_then(|value| value.trim().trim_end_matches("ms").parse::<u64>().ok())
        .map(Duration::from_millis);
    let taken = reported.unwrap_or_else(|| response.elapsed());
    assert!(
        taken < max,
        "Response time {}ms exceeded {}ms",
        taken.as_millis(),
        max.as_millis()
    );
}

// Header names are matched case-insensitively
#[track_caller]
pub fn assert_headers(response: &RawResponse, expected: &[(&str, &str)]) {
    for (name, value) in expected {
        assert_eq!(
            response.header(name),
            Some(*value),
            "Header {} should be {}",
            name,
            value
        );
    }
}

#[track_caller]
pub fn assert_alphanumeric_token(token: &str) {
    assert!(
        !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric()),
        "Expected a non-empty alphanumeric token but got {:?}",
        token
    );
}
