//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod commands;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{APP_NAME, Modal, Model, PromptPurpose, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use image::DynamicImage;
use ratatui_image::picker::Picker;

use crate::search::SearchOptions;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Default)]
pub struct App {
    initial_file: Option<PathBuf>,
    search_options: SearchOptions,
    icon: Option<DynamicImage>,
    picker: Option<Picker>,
}

impl App {
    /// Create an application with an empty, untitled buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open this file at startup.
    #[must_use]
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }

    /// Matching policy for Find and Replace.
    #[must_use]
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    /// Icon for the About dialog and the picker used to draw it.
    #[must_use]
    pub fn with_icon(mut self, icon: Option<DynamicImage>, picker: Option<Picker>) -> Self {
        self.icon = icon;
        self.picker = picker;
        self
    }
}
