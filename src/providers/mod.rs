//! Session and track graphic source implementations
//!
//! - [`fs`]: documents on disk under a configured data root
//! - [`embedded`]: records and graphics held in memory, for bundled assets and
//!   tests

pub mod embedded;
pub mod fs;

pub use embedded::{StaticSessionSource, StaticTrackGraphics};
pub use fs::{FsSessionSource, FsTrackGraphics, load_calendar, load_track_catalog};

use crate::{PaddockError, Result};

/// Graphic resources are plain `.svg` file names, never paths.
pub(crate) fn check_graphic_name(resource: &str) -> Result<()> {
    let plain = !resource.is_empty()
        && resource != ".."
        && !resource.contains(['/', '\\'])
        && !resource.starts_with('.');
    let svg = resource.len() > 4
        && resource.get(resource.len() - 4..).is_some_and(|ext| ext.eq_ignore_ascii_case(".svg"));

    if plain && svg {
        Ok(())
    } else {
        Err(PaddockError::UnsupportedGraphic { resource: resource.to_string() })
    }
}
