// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod reservation;
pub mod user;

pub use reservation::{NewReservation, Reservation};
pub use user::{Credential, Profile, Registration};
