//! The virtual keyboard component
//!
//! `VirtualKeyboard` owns the layout selection and caps lock flag. It writes
//! into a host-provided `TextBuffer` and publishes its key grid to a
//! host-provided `KeySurface` whenever the visible labels change.

use crate::buffer::TextBuffer;
use crate::constants::DEFAULT_REPEAT_INTERVAL_MS;
use crate::error::{AppError, Result};
use crate::layout::{KeyKind, LayoutTable, display_label};
use crate::repeat::HoldRepeater;
use crate::types::{KeyAction, KeyElement, KeyGrid, KeyPos};
use std::time::{Duration, Instant};

/// Anything that can host the rendered rows of keys
pub trait KeySurface {
    /// Replace everything previously mounted with `grid`
    fn mount(&mut self, grid: KeyGrid);
}

impl<T: KeySurface + ?Sized> KeySurface for &mut T {
    fn mount(&mut self, grid: KeyGrid) {
        (**self).mount(grid)
    }
}

/// A key event coming from the real keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalKey {
    CapsLock,
    Backspace,
    Char(char),
    /// Shift and Alt held together
    ShiftAlt,
}

#[derive(Debug, Clone)]
pub struct KeyboardOptions {
    pub language: Option<String>,
    pub repeat_interval: Duration,
}

impl Default for KeyboardOptions {
    fn default() -> Self {
        KeyboardOptions {
            language: None,
            repeat_interval: Duration::from_millis(DEFAULT_REPEAT_INTERVAL_MS),
        }
    }
}

pub struct VirtualKeyboard<B, S> {
    table: LayoutTable,
    current: usize,
    caps_lock: bool,
    buffer: B,
    surface: S,
    repeater: HoldRepeater,
    pressed: Option<KeyPos>,
}

impl<B: TextBuffer, S: KeySurface> VirtualKeyboard<B, S> {
    /// Create the keyboard and mount its first render on `surface`
    pub fn new(table: LayoutTable, buffer: B, surface: S, options: KeyboardOptions) -> Result<Self> {
        let current = match &options.language {
            Some(language) => table
                .position(language)
                .ok_or_else(|| AppError::UnknownLayout(language.clone()))?,
            None => 0,
        };

        let mut keyboard = VirtualKeyboard {
            table,
            current,
            caps_lock: false,
            buffer,
            surface,
            repeater: HoldRepeater::new(options.repeat_interval),
            pressed: None,
        };
        tracing::info!(
            "Keyboard created: layout={}, {} layouts available",
            keyboard.language(),
            keyboard.table.len()
        );
        keyboard.render();
        Ok(keyboard)
    }

    pub fn language(&self) -> &str {
        self.table.language_at(self.current)
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    pub fn table(&self) -> &LayoutTable {
        &self.table
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn pressed(&self) -> Option<KeyPos> {
        self.pressed
    }

    pub fn is_repeating(&self) -> bool {
        self.repeater.is_repeating()
    }

    /// Build the key grid for the current layout and caps lock state
    pub fn grid(&self) -> KeyGrid {
        self.table
            .rows_at(self.current)
            .iter()
            .map(|row| {
                row.iter()
                    .map(|label| KeyElement {
                        label: display_label(label, self.caps_lock),
                        action: action_for(label),
                    })
                    .collect()
            })
            .collect()
    }

    /// Replace the surface content with a fresh grid
    pub fn render(&mut self) {
        let grid = self.grid();
        tracing::debug!(
            "Rendering layout {} ({} rows, caps_lock={})",
            self.language(),
            grid.len(),
            self.caps_lock
        );
        self.surface.mount(grid);
    }

    pub fn handle_key_input(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn delete_last(&mut self) {
        self.buffer.pop_unit();
    }

    pub fn toggle_caps_lock(&mut self) {
        self.caps_lock = !self.caps_lock;
        tracing::debug!("Caps lock {}", if self.caps_lock { "on" } else { "off" });
        self.render();
    }

    /// Advance to the next layout, wrapping after the last one
    pub fn switch_language(&mut self) {
        self.current = self.table.next_index(self.current);
        tracing::info!("Switched layout to {}", self.language());
        self.end_press();
        self.render();
    }

    pub fn set_language(&mut self, language: &str) -> Result<()> {
        self.current = self
            .table
            .position(language)
            .ok_or_else(|| AppError::UnknownLayout(language.to_string()))?;
        tracing::info!("Layout set to {}", self.language());
        self.end_press();
        self.render();
        Ok(())
    }

    pub fn dispatch(&mut self, action: &KeyAction) {
        match action {
            KeyAction::Insert(label) => {
                let text = display_label(label, self.caps_lock);
                self.handle_key_input(&text);
            }
            KeyAction::Backspace => self.delete_last(),
            KeyAction::Space => self.handle_key_input(" "),
            KeyAction::Enter => self.handle_key_input("\n"),
            KeyAction::CapsLock => self.toggle_caps_lock(),
            KeyAction::Inert => {}
        }
    }

    /// Pointer pressed on `pos`. Fires the key's action once and, for
    /// repeatable keys, starts the hold timer.
    pub fn pointer_down(&mut self, pos: KeyPos, now: Instant) {
        let Some(action) = self.action_at(pos) else {
            return;
        };

        self.pressed = Some(pos);
        self.repeater.stop();
        if action == KeyAction::Inert {
            return;
        }

        self.dispatch(&action);
        if action.repeats() {
            self.repeater.start(pos, action, now);
        }
    }

    /// Pointer moved while pressed; leaving the held key ends the press
    pub fn pointer_moved(&mut self, pos: Option<KeyPos>) {
        if self.pressed.is_some() && self.pressed != pos {
            self.pressed = None;
        }
        self.repeater.pointer_at(pos);
    }

    pub fn pointer_up(&mut self) {
        self.end_press();
    }

    /// The held key no longer exists once the layout changes
    fn end_press(&mut self) {
        self.pressed = None;
        self.repeater.stop();
    }

    /// Fire any repeats that are due
    pub fn tick(&mut self, now: Instant) {
        if let Some((action, count)) = self.repeater.poll(now) {
            for _ in 0..count {
                self.dispatch(&action);
            }
        }
    }

    /// Mirror a real key press onto the keyboard
    pub fn handle_physical_key(&mut self, key: PhysicalKey) {
        match key {
            PhysicalKey::CapsLock => self.toggle_caps_lock(),
            PhysicalKey::Backspace => self.delete_last(),
            PhysicalKey::Char(c) => {
                // Only Latin letters are case-folded here
                let c = if self.caps_lock {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                };
                let mut utf8 = [0u8; 4];
                self.handle_key_input(c.encode_utf8(&mut utf8));
            }
            PhysicalKey::ShiftAlt => self.switch_language(),
        }
    }

    fn action_at(&self, pos: KeyPos) -> Option<KeyAction> {
        self.table
            .rows_at(self.current)
            .get(pos.row)?
            .get(pos.col)
            .map(|label| action_for(label))
    }
}

fn action_for(label: &str) -> KeyAction {
    match KeyKind::classify(label) {
        KeyKind::Space => KeyAction::Space,
        KeyKind::Backspace => KeyAction::Backspace,
        KeyKind::Enter => KeyAction::Enter,
        KeyKind::CapsLock => KeyAction::CapsLock,
        KeyKind::Inert => KeyAction::Inert,
        KeyKind::Character => KeyAction::Insert(label.to_string()),
    }
}
