//! Header Tests
//!
//! Command size and response return-code accessors.
