//! Tracing target shared by every event the crate emits.
//!
//! The crate never installs a subscriber; filter on this target to see
//! registry construction, signature resolution and pattern cache activity.

pub(crate) const LOG_TARGET: &str = "colexpr";
