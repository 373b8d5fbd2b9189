//! Reservation models.
//!
//! Reservations are owned entirely by the backend; the client never caches
//! them, so these types exist only to cross the wire.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A reservation as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Backend-assigned identifier.
    pub reservation_id: String,
    pub email: String,
    pub car_plate: String,
    pub parking_spot_id: u32,
    /// Reservation day, `YYYY-MM-DD` on the wire.
    pub date: NaiveDate,
    /// `[start, end]` times, `HH:MM:SS` on the wire.
    pub hour_range: [NaiveTime; 2],
    /// Backend workflow state, `pending` on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A reservation request the client submits.
#[derive(Debug, Clone, Serialize)]
pub struct NewReservation {
    pub email: String,
    pub car_plate: String,
    pub parking_spot_id: u32,
    pub date: NaiveDate,
    pub hour_range: [NaiveTime; 2],
}

impl NewReservation {
    /// Start of the requested window.
    pub fn start(&self) -> NaiveTime {
        self.hour_range[0]
    }

    /// End of the requested window.
    pub fn end(&self) -> NaiveTime {
        self.hour_range[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_wire_format() {
        let json = r#"{
            "reservation_id": "a@x.com#2026-08-07#1#09:00:00-10:30:00",
            "email": "a@x.com",
            "car_plate": "ABC123",
            "parking_spot_id": 1,
            "date": "2026-08-07",
            "hour_range": ["09:00:00", "10:30:00"],
            "status": "pending"
        }"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
        assert_eq!(
            r.hour_range[1],
            NaiveTime::from_hms_opt(10, 30, 0).unwrap()
        );
        assert_eq!(r.status.as_deref(), Some("pending"));
    }

    #[test]
    fn status_absent_is_none() {
        let json = r#"{
            "reservation_id": "x",
            "email": "a@x.com",
            "car_plate": "ABC123",
            "parking_spot_id": 1,
            "date": "2026-08-07",
            "hour_range": ["09:00:00", "10:00:00"]
        }"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert!(r.status.is_none());
    }
}
