pub mod console;
pub mod formatter;
