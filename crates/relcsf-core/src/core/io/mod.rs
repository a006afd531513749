//! Provides file input for batch descriptions.
//!
//! A batch file lists the configuration groups to enumerate, optional session
//! limits, and an optional group mixture from which the mean configuration of
//! the central potential is built. See [`batch::BatchSpec`] for the layout.

pub mod batch;
