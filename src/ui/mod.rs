pub mod input_handler;
pub mod layout;
pub mod widgets;
