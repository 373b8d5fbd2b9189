// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod api;
pub mod plates;
pub mod reservations;
pub mod session;
pub mod sync;

pub use api::ParkApiClient;
pub use plates::PlateService;
pub use reservations::ReservationService;
pub use session::SessionService;
pub use sync::PendingSyncService;
