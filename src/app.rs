use crate::buffer::{InputField, TextBuffer};
use crate::error::Result;
use crate::keyboard::{KeyboardOptions, VirtualKeyboard};
use crate::layout::LayoutTable;
use crate::types::UiMode;
use crate::ui::widgets::keyboard::KeyboardPanel;

pub type TerminalKeyboard = VirtualKeyboard<InputField, KeyboardPanel>;

pub struct AppState {
    pub keyboard: TerminalKeyboard,
    pub ui_mode: UiMode,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(table: LayoutTable, options: KeyboardOptions) -> Result<Self> {
        let keyboard =
            VirtualKeyboard::new(table, InputField::default(), KeyboardPanel::new(), options)?;

        Ok(AppState {
            keyboard,
            ui_mode: UiMode::Normal,
            should_quit: false,
        })
    }

    pub fn toggle_help(&mut self) {
        self.ui_mode = match self.ui_mode {
            UiMode::Normal => {
                // The popup covers the keys, so a held key is let go
                self.keyboard.pointer_up();
                UiMode::Help
            }
            UiMode::Help => UiMode::Normal,
        };
    }

    pub fn text(&self) -> &str {
        self.keyboard.buffer().value()
    }
}
