mod command_parser;

pub use command_parser::CommandParser;
