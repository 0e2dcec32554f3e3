//! Player controller module
//!
//! Host-side integration of the locomotion core with a physics body.

mod controller;

pub use controller::PlayerController;
