//! # Schema Subcommand
//!
//! Prints the bundled structural schema so editors and external tooling
//! can validate content as it is typed.

use std::io::Write;

use anyhow::Result;

use docforge_schema::LANGUAGE_CONFIG_SCHEMA;

use crate::EXIT_OK;

/// Execute the schema subcommand, writing to stdout.
pub fn run_schema() -> Result<u8> {
    let stdout = std::io::stdout();
    schema_to(&mut stdout.lock())
}

pub fn schema_to(out: &mut impl Write) -> Result<u8> {
    out.write_all(LANGUAGE_CONFIG_SCHEMA.as_bytes())?;
    if !LANGUAGE_CONFIG_SCHEMA.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_parseable_schema() {
        let mut out = Vec::new();
        assert_eq!(schema_to(&mut out).unwrap(), EXIT_OK);
        let schema: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(schema["title"], "LanguageConfig");
    }
}
