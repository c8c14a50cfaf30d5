/// Position of a key in the rendered grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPos {
    pub row: usize,
    pub col: usize,
}

impl KeyPos {
    pub fn new(row: usize, col: usize) -> Self {
        KeyPos { row, col }
    }
}

/// Action wired to a rendered key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Type the key's label, cased by caps lock at the moment it fires
    Insert(String),
    Backspace,
    Space,
    Enter,
    CapsLock,
    /// Decorative key, never dispatched
    Inert,
}

impl KeyAction {
    /// Character keys and Backspace repeat while held
    pub fn repeats(&self) -> bool {
        matches!(self, KeyAction::Insert(_) | KeyAction::Backspace)
    }
}

/// One interactive key as handed to a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyElement {
    pub label: String,
    pub action: KeyAction,
}

pub type KeyGrid = Vec<Vec<KeyElement>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Help,
}
