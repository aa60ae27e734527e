//! Page-level state owners
//!
//! Each panel owns one [`LatestLoader`](crate::loader::LatestLoader) and the
//! selection that drives it. Derived views (chart state, corner table,
//! rendered track) are recomputed from the current load state on demand.

mod session;
mod track;

pub use session::SessionPanel;
pub use track::TrackPanel;
