//! # mars-rover
//!
//! Command optimizer and motion engine for a rover walking an integer grid.
//!
//! A raw command string over `F`, `B`, `L`, `R` is collapsed by the
//! [`CommandOptimizer`] into a [`Route`] of run-length-encoded [`Move`]s, which a
//! [`Rover`] then applies to its position and [`Heading`]. [`Mission`] ties the
//! two together for callers that just want the final state.
//!
//! ```
//! use mars_rover::{Heading, Mission};
//!
//! let mut mission = Mission::default();
//! let end = mission.calculate_route("FLFRRB").unwrap();
//! assert_eq!((end.position.x, end.position.y), (-1, 2));
//! assert_eq!(end.heading, Heading::East);
//! ```

pub mod error;
pub mod logging;
pub mod mission;
pub mod moves;
pub mod optimizer;
pub mod rover;

pub use error::*;
pub use mission::*;
pub use moves::*;
pub use optimizer::*;
pub use rover::*;
