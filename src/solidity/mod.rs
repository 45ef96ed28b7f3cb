pub mod ast;
pub mod builders;

pub use ast::*;
pub use builders::{parse_expression, parse_variable_declaration, Emitter};
