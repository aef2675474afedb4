//! Output formatting for CLI.

mod json;
mod text;

pub use json::{
    HomeOutput, JsonFormatter, ModuleOutput, NavOutput, NoticeOutput, PricingOutput, TokenOutput,
    TokensOutput,
};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
