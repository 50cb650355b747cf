//! Checkout support: planning and applying the working directory changes
//! needed to move from one branch's snapshot to another's.

pub mod migration;
