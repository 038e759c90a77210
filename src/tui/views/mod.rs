pub mod form;
pub mod key_entry;
pub mod output;
