use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};

use super::effects::TerminalSync;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, texedit requires an interactive terminal")?;
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        let size = terminal.size()?;

        let about_icon = match (self.picker.as_ref(), self.icon.take()) {
            (Some(picker), Some(icon)) => Some(picker.new_resize_protocol(icon)),
            _ => None,
        };
        let mut model = Model::new((size.width, size.height))
            .with_search_options(self.search_options)
            .with_about_icon(about_icon);

        if let Some(path) = &self.initial_file
            && let Err(err) = model.open_file(path)
        {
            tracing::warn!(%err, "initial file not opened");
            model.show_toast(ToastLevel::Error, err.to_string());
        }

        let result = Self::event_loop(&mut terminal, &mut model);

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut terminal_sync = TerminalSync::default();
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    Self::apply(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        Self::apply(model, msg);
                        needs_render = true;
                    }
                }
            }

            match terminal_sync.sync(model, &mut stdout()) {
                Ok(changed) => needs_render |= changed,
                Err(err) => tracing::warn!(%err, "terminal title/font update failed"),
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub(super) fn apply(model: &mut Model, msg: Message) {
        tracing::trace!(?msg, "message");
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model);
    }
}
