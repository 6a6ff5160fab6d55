pub mod error;
pub mod flags;
pub mod shell;

pub mod core;
pub mod highlight;
pub mod input;
pub mod output;
pub mod path;

#[cfg(test)]
mod test_utils;
