//! Internal implementation details.

mod circular;

pub(crate) use circular::enter_resolution;
