//! Keyboard layouts and key label rules
//!
//! A `LayoutTable` is an ordered list of languages, each mapping to a grid of
//! key labels. Some labels are control tokens ("Space", "Caps Lock", ...)
//! rather than literal characters; `KeyKind::classify` tells them apart.

use crate::error::{AppError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Letters that have a case: Latin and Cyrillic (including Ё)
    static ref CASED_LETTER: Regex = Regex::new(r"^[a-zA-Zа-яёА-ЯЁ]$").unwrap();
}

pub type Row = Vec<String>;

/// What a key does when it is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Space,
    Backspace,
    Enter,
    CapsLock,
    /// Shift, Alt, Ctrl and Tab are drawn but do nothing
    Inert,
    Character,
}

impl KeyKind {
    pub fn classify(label: &str) -> Self {
        match label {
            "Space" => KeyKind::Space,
            "Backspace" => KeyKind::Backspace,
            "Enter" => KeyKind::Enter,
            "Caps Lock" => KeyKind::CapsLock,
            "Shift" | "Alt" | "Ctrl" | "Tab" => KeyKind::Inert,
            _ => KeyKind::Character,
        }
    }

    pub fn is_control(&self) -> bool {
        !matches!(self, KeyKind::Character)
    }
}

/// Text shown on a key for the given caps lock state.
///
/// Single cased letters follow caps lock; digits, punctuation, kana and
/// control tokens are shown verbatim.
pub fn display_label(label: &str, caps_lock: bool) -> String {
    if CASED_LETTER.is_match(label) {
        if caps_lock {
            label.to_uppercase()
        } else {
            label.to_lowercase()
        }
    } else {
        label.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTable {
    layouts: Vec<(String, Vec<Row>)>,
}

impl LayoutTable {
    /// Build a table from `(language, rows)` pairs, keeping their order
    pub fn new(layouts: Vec<(String, Vec<Row>)>) -> Result<Self> {
        if layouts.is_empty() {
            return Err(AppError::EmptyLayoutTable);
        }

        for (idx, (language, rows)) in layouts.iter().enumerate() {
            if layouts[..idx].iter().any(|(other, _)| other == language) {
                return Err(AppError::DuplicateLayout(language.clone()));
            }
            if rows.is_empty() {
                return Err(AppError::InvalidLayout {
                    language: language.clone(),
                    reason: "layout has no rows".to_string(),
                });
            }
            if let Some(row_idx) = rows.iter().position(|row| row.is_empty()) {
                return Err(AppError::InvalidLayout {
                    language: language.clone(),
                    reason: format!("row {} has no keys", row_idx + 1),
                });
            }
        }

        Ok(LayoutTable { layouts })
    }

    /// The English, Russian and Japanese layouts, in that order
    pub fn builtin() -> Self {
        fn rows(rows: &[&[&str]]) -> Vec<Row> {
            rows.iter()
                .map(|row| row.iter().map(|key| key.to_string()).collect())
                .collect()
        }

        let en = rows(&[
            &["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "Backspace"],
            &["Tab", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "[", "]", "\\"],
            &["Caps Lock", "A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "'", "Enter"],
            &["Shift", "Z", "X", "C", "V", "B", "N", "M", ",", ".", "/", "Shift"],
            &["Ctrl", "Alt", "Space", "Alt", "Ctrl"],
        ]);
        let ru = rows(&[
            &["ё", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "Backspace"],
            &["Tab", "Й", "Ц", "У", "К", "Е", "Н", "Г", "Ш", "Щ", "З", "Х", "Ъ", "\\"],
            &["Caps Lock", "Ф", "Ы", "В", "А", "П", "Р", "О", "Л", "Д", "Ж", "Э", "Enter"],
            &["Shift", "Я", "Ч", "С", "М", "И", "Т", "Ь", "Б", "Ю", ".", "Shift"],
            &["Ctrl", "Alt", "Space", "Alt", "Ctrl"],
        ]);
        let jp = rows(&[
            &["ぬ", "ふ", "あ", "う", "え", "お", "や", "ゆ", "よ", "わ", "ほ", "へ", "Backspace"],
            &["Tab", "た", "て", "い", "す", "か", "ん", "な", "に", "ら", "せ", "゛", "゜", "\\"],
            &["Caps Lock", "ち", "と", "し", "は", "き", "く", "ま", "の", "り", "れ", "け", "Enter"],
            &["Shift", "つ", "さ", "そ", "ひ", "こ", "み", "も", "ね", "る", "め", "Shift"],
            &["Ctrl", "Alt", "Space", "Alt", "Ctrl"],
        ]);

        LayoutTable {
            layouts: vec![
                ("en".to_string(), en),
                ("ru".to_string(), ru),
                ("jp".to_string(), jp),
            ],
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.layouts.iter().map(|(language, _)| language.as_str())
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn position(&self, language: &str) -> Option<usize> {
        self.layouts.iter().position(|(code, _)| code == language)
    }

    pub fn language_at(&self, idx: usize) -> &str {
        &self.layouts[idx].0
    }

    pub fn rows_at(&self, idx: usize) -> &[Row] {
        &self.layouts[idx].1
    }

    pub fn rows(&self, language: &str) -> Option<&[Row]> {
        self.position(language).map(|idx| self.rows_at(idx))
    }

    /// Index of the layout after `idx`, wrapping around to the first
    pub fn next_index(&self, idx: usize) -> usize {
        (idx + 1) % self.layouts.len()
    }
}
