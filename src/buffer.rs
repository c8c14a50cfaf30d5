//! Text targets the keyboard writes into

/// A string-valued field owned by the host that the keyboard appends to
/// and truncates.
pub trait TextBuffer {
    fn value(&self) -> &str;

    fn push_str(&mut self, text: &str);

    /// Remove the last character. Does nothing when the value is empty.
    fn pop_unit(&mut self);
}

impl<T: TextBuffer + ?Sized> TextBuffer for &mut T {
    fn value(&self) -> &str {
        (**self).value()
    }

    fn push_str(&mut self, text: &str) {
        (**self).push_str(text)
    }

    fn pop_unit(&mut self) {
        (**self).pop_unit()
    }
}

/// Plain text input field shown above the keyboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    text: String,
}

impl InputField {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextBuffer for InputField {
    fn value(&self) -> &str {
        &self.text
    }

    fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn pop_unit(&mut self) {
        self.text.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_in_order() {
        let mut field = InputField::new("ab");
        field.push_str("c");
        field.push_str("\n");
        assert_eq!(field.value(), "abc\n");
    }

    #[test]
    fn test_pop_removes_one_character() {
        let mut field = InputField::new("жё");
        field.pop_unit();
        assert_eq!(field.value(), "ж");
    }

    #[test]
    fn test_pop_on_empty_is_noop() {
        let mut field = InputField::default();
        field.pop_unit();
        field.pop_unit();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn type_into<B: TextBuffer>(mut target: B) {
            target.push_str("hi");
            target.pop_unit();
        }

        let mut field = InputField::default();
        type_into(&mut field);
        assert_eq!(field.value(), "h");
    }
}
