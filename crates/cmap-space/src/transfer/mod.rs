//! Transfer functions (gamma curves) of the RGB spaces in the graph.
//!
//! Both curves mirror around zero so that slightly negative values produced
//! by matrix round-off survive a decode/encode round trip.

pub mod adobe;
pub mod srgb;
