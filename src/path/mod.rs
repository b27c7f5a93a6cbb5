pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod segment;
pub(crate) mod shape;
pub(crate) mod svg;
