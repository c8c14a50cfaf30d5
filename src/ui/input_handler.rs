use crate::app::AppState;
use crate::keyboard::PhysicalKey;
use crate::types::UiMode;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Instant;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(app: &mut AppState, key: KeyEvent) {
        match app.ui_mode {
            UiMode::Help => Self::handle_help(app, key),
            UiMode::Normal => Self::handle_normal(app, key),
        }
    }

    fn handle_help(app: &mut AppState, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::F(1) => {
                app.ui_mode = UiMode::Normal;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_normal(app: &mut AppState, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
                return;
            }
            // Help
            KeyCode::F(1) => {
                app.toggle_help();
                return;
            }
            _ => {}
        }

        match physical_key(&key) {
            Some(physical) => {
                tracing::debug!("Physical key {:?}", physical);
                app.keyboard.handle_physical_key(physical);
            }
            None => tracing::trace!("Ignoring key {:?}", key),
        }
    }

    pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent, now: Instant) {
        let target = app.keyboard.surface().hit_test(mouse.column, mouse.row);
        match mouse.kind {
            // New presses only start on the keyboard itself; releases and
            // moves always reach it so a held key can end under the popup
            MouseEventKind::Down(MouseButton::Left) => {
                if app.ui_mode == UiMode::Normal
                    && let Some(pos) = target
                {
                    app.keyboard.pointer_down(pos, now);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                app.keyboard.pointer_moved(target);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                app.keyboard.pointer_up();
            }
            _ => {}
        }
    }
}

/// Map a terminal key event onto the keys the keyboard mirrors.
///
/// Shift+Alt switches layout whether it arrives as a modifier-only event
/// (terminals with enhanced key reporting) or on a character key.
pub fn physical_key(key: &KeyEvent) -> Option<PhysicalKey> {
    let shift_alt = KeyModifiers::SHIFT | KeyModifiers::ALT;

    match key.code {
        KeyCode::CapsLock => Some(PhysicalKey::CapsLock),
        KeyCode::Backspace => Some(PhysicalKey::Backspace),
        KeyCode::Modifier(modifier) => {
            let own = match modifier {
                ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => KeyModifiers::SHIFT,
                ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => KeyModifiers::ALT,
                _ => KeyModifiers::NONE,
            };
            (key.modifiers | own)
                .contains(shift_alt)
                .then_some(PhysicalKey::ShiftAlt)
        }
        KeyCode::Char(_) if key.modifiers.contains(shift_alt) => Some(PhysicalKey::ShiftAlt),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            Some(PhysicalKey::Char(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyboardOptions;
    use crate::layout::LayoutTable;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> AppState {
        let mut app = AppState::new(LayoutTable::builtin(), KeyboardOptions::default()).unwrap();
        app.keyboard
            .surface_mut()
            .set_area(Rect::new(0, 0, 120, 20));
        app
    }

    #[test]
    fn test_physical_mapping() {
        assert_eq!(
            physical_key(&key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(PhysicalKey::Char('a'))
        );
        assert_eq!(
            physical_key(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(PhysicalKey::Char('A'))
        );
        assert_eq!(
            physical_key(&key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(PhysicalKey::Backspace)
        );
        assert_eq!(
            physical_key(&key(KeyCode::CapsLock, KeyModifiers::NONE)),
            Some(PhysicalKey::CapsLock)
        );
    }

    #[test]
    fn test_shift_alt_switches_layout() {
        assert_eq!(
            physical_key(&key(
                KeyCode::Modifier(ModifierKeyCode::LeftAlt),
                KeyModifiers::SHIFT
            )),
            Some(PhysicalKey::ShiftAlt)
        );
        assert_eq!(
            physical_key(&key(
                KeyCode::Char('K'),
                KeyModifiers::SHIFT | KeyModifiers::ALT
            )),
            Some(PhysicalKey::ShiftAlt)
        );
        assert_eq!(
            physical_key(&key(
                KeyCode::Modifier(ModifierKeyCode::LeftShift),
                KeyModifiers::NONE
            )),
            None
        );
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        assert_eq!(physical_key(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
        assert_eq!(physical_key(&key(KeyCode::Tab, KeyModifiers::NONE)), None);
        assert_eq!(
            physical_key(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(physical_key(&key(KeyCode::Char('x'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_typing_through_handler() {
        let mut app = app();
        for c in "hi".chars() {
            InputHandler::handle_key(&mut app, key(KeyCode::Char(c), KeyModifiers::NONE));
        }
        InputHandler::handle_key(&mut app, key(KeyCode::CapsLock, KeyModifiers::NONE));
        InputHandler::handle_key(&mut app, key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.text(), "hiX");
        assert!(app.keyboard.caps_lock());
    }

    #[test]
    fn test_quit_and_help_keys() {
        let mut app = app();
        InputHandler::handle_key(&mut app, key(KeyCode::F(1), KeyModifiers::NONE));
        assert_eq!(app.ui_mode, UiMode::Help);

        // Typing is not forwarded while help is open
        InputHandler::handle_key(&mut app, key(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(app.text(), "");

        InputHandler::handle_key(&mut app, key(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(!app.should_quit);

        InputHandler::handle_key(&mut app, key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let event = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        InputHandler::handle_key(&mut app, event);
        assert!(app.should_quit);
        assert_eq!(app.text(), "");
    }

    #[test]
    fn test_mouse_hold_and_release() {
        let mut app = app();
        let rects = app.keyboard.surface().key_rects();
        // First row of the English layout ends with Backspace
        let backspace = *rects[0].last().unwrap();
        let digit = rects[0][1];
        let t0 = Instant::now();

        InputHandler::handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), digit.x + 1, digit.y + 1),
            t0,
        );
        InputHandler::handle_mouse(
            &mut app,
            mouse(MouseEventKind::Up(MouseButton::Left), digit.x + 1, digit.y + 1),
            t0,
        );
        assert_eq!(app.text(), "1");

        InputHandler::handle_mouse(
            &mut app,
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                backspace.x + 1,
                backspace.y + 1,
            ),
            t0,
        );
        assert_eq!(app.text(), "");
        assert!(app.keyboard.is_repeating());

        // Dragging off the key ends the hold
        InputHandler::handle_mouse(
            &mut app,
            mouse(MouseEventKind::Drag(MouseButton::Left), 0, 19),
            t0 + Duration::from_millis(10),
        );
        assert!(!app.keyboard.is_repeating());
        assert!(app.keyboard.pressed().is_none());
    }

    #[test]
    fn test_release_during_help_ends_hold() {
        let mut app = app();
        app.keyboard.handle_key_input("abcdef");
        let backspace = *app.keyboard.surface().key_rects()[0].last().unwrap();
        let t0 = Instant::now();

        InputHandler::handle_mouse(
            &mut app,
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                backspace.x + 1,
                backspace.y + 1,
            ),
            t0,
        );
        assert_eq!(app.text(), "abcde");

        // Popup opened without going through toggle_help
        app.ui_mode = UiMode::Help;
        InputHandler::handle_mouse(
            &mut app,
            mouse(
                MouseEventKind::Up(MouseButton::Left),
                backspace.x + 1,
                backspace.y + 1,
            ),
            t0 + Duration::from_millis(10),
        );
        assert!(!app.keyboard.is_repeating());

        app.keyboard.tick(t0 + Duration::from_millis(1000));
        assert_eq!(app.text(), "abcde");
    }

    #[test]
    fn test_opening_help_ends_hold() {
        let mut app = app();
        app.keyboard.handle_key_input("abcdef");
        let backspace = *app.keyboard.surface().key_rects()[0].last().unwrap();
        let t0 = Instant::now();

        InputHandler::handle_mouse(
            &mut app,
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                backspace.x + 1,
                backspace.y + 1,
            ),
            t0,
        );
        InputHandler::handle_key(&mut app, key(KeyCode::F(1), KeyModifiers::NONE));
        assert_eq!(app.ui_mode, UiMode::Help);
        assert!(!app.keyboard.is_repeating());

        // Presses under the popup do not reach the keys
        InputHandler::handle_mouse(
            &mut app,
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                backspace.x + 1,
                backspace.y + 1,
            ),
            t0 + Duration::from_millis(20),
        );
        app.keyboard.tick(t0 + Duration::from_millis(1000));
        assert_eq!(app.text(), "abcde");
        assert!(app.keyboard.pressed().is_none());
    }
}
