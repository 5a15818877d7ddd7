//! Player input module
//!
//! ```text
//! Host devices (keyboard/gamepad/mouse)
//!     ↓
//! PlayerInputFrame (resource) - frame.rs
//!     ↓
//! map_move_input (InputMapper) - mapper.rs
//!     ↓
//! Locomotion.raw_input (player domain)
//! ```

pub mod frame;
pub mod mapper;

pub use frame::*;
pub use mapper::*;
