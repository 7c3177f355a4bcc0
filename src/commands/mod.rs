pub mod click;
pub mod content;
pub mod elements;
pub mod eval;
pub mod hover;
pub mod key;
pub mod screenshot;
pub mod scroll;
pub mod select;
pub mod r#type;
pub mod utils;
pub mod view;

#[cfg(test)]
#[path = "../commands_test.rs"]
mod commands_test;
