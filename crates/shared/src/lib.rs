//! Wire types exchanged with the intervention recommendation backend.

pub mod protocol;
