//! Application icon and terminal image support.
//!
//! The icon is loaded once at startup and shown in the About dialog.
//! Image output goes through `ratatui-image`, which picks the best graphics
//! protocol the terminal supports and falls back to half-block cells.

use std::path::Path;
#[cfg(unix)]
use std::time::Duration;

use image::DynamicImage;
use ratatui_image::picker::Picker;
#[cfg(unix)]
use ratatui_image::picker::cap_parser::QueryStdioOptions;

use crate::error::EditorError;

/// Icon looked up in the working directory when `--icon` is not given.
pub const DEFAULT_ICON_PATH: &str = "texedit.png";

#[cfg(unix)]
const PICKER_QUERY_TIMEOUT_MS: u64 = 250;

/// Load the icon image.
///
/// # Errors
///
/// Returns [`EditorError::Icon`] if the file is missing or not a decodable image.
pub fn load_icon(path: &Path) -> Result<DynamicImage, EditorError> {
    image::open(path).map_err(|source| EditorError::Icon {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the About icon from `path`, or from [`DEFAULT_ICON_PATH`] when none
/// is given. Failure is logged and leaves the dialog without a picture.
pub fn load_about_icon(path: Option<&Path>) -> Option<DynamicImage> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_ICON_PATH));
    match load_icon(path) {
        Ok(icon) => Some(icon),
        Err(err) => {
            tracing::warn!(%err, explicit, "about icon not loaded");
            None
        }
    }
}

/// Create a picker for terminal image rendering.
///
/// Must run before the terminal enters raw mode, since detection queries stdio.
pub fn create_picker(force_half_cell: bool) -> Option<Picker> {
    if force_half_cell {
        tracing::debug!("forced half-cell image protocol");
        return Some(Picker::halfblocks());
    }

    // The Windows console query can leave a reader thread blocking input.
    #[cfg(not(unix))]
    {
        return Some(Picker::halfblocks());
    }

    #[cfg(unix)]
    {
        match Picker::from_query_stdio_with_options(query_options()) {
            Ok(picker) => {
                tracing::debug!(protocol = ?picker.protocol_type(), "detected image protocol");
                Some(picker)
            }
            Err(err) => {
                tracing::warn!(%err, "terminal image query failed, using half-blocks");
                Some(Picker::halfblocks())
            }
        }
    }
}

#[cfg(unix)]
fn query_options() -> QueryStdioOptions {
    let mut options = QueryStdioOptions::default();
    options.timeout = Duration::from_millis(PICKER_QUERY_TIMEOUT_MS);
    options
}
