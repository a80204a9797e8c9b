pub mod config;
pub mod logger;
pub mod content;
pub mod text_utils;
pub mod post_list;
pub mod validator;
pub mod tag_store;
pub mod prompt;
pub mod post_template;
pub mod scaffold;
mod lang;
mod test_data;

pub use lang::Lang;
