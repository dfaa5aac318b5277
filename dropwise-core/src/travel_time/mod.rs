//! Query travel times from the origin to pending destinations.
//!
//! The [`TravelTimeService`] trait abstracts the travel-time-matrix
//! collaborator. Callers supply one origin and `n` destinations and receive
//! `n` durations in destination order.

mod error;
mod service;

pub use error::TravelTimeError;
pub use service::TravelTimeService;
