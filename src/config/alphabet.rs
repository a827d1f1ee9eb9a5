//! Symbol alphabet - the fixed glyph set a session draws from

use crate::error::{Result, SymbolSearchError};
use ahash::AHashSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Glyphs used by the classic paper test layout
pub const DEFAULT_SYMBOLS: [&str; 20] = [
    "⊕", "⊖", "⊥", "⊃", "↻", "↷", "⊓", "⊔", "⊞", "⊠", "⊢", "⊣", "⊤", "⊨", "⊩", "⊬", "⊭", "⊯",
    "⊲", "⊳",
];

/// A single glyph identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self(glyph.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(glyph: &str) -> Self {
        Self::new(glyph)
    }
}

impl From<String> for Symbol {
    fn from(glyph: String) -> Self {
        Self(glyph)
    }
}

/// Ordered set of distinct symbols, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolAlphabet {
    symbols: Vec<Symbol>,
}

impl SymbolAlphabet {
    /// Build an alphabet, rejecting empty input and repeated glyphs
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(SymbolSearchError::Configuration(
                "alphabet must contain at least one symbol".to_string(),
            ));
        }

        let mut seen = AHashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if symbol.as_str().is_empty() {
                return Err(SymbolSearchError::Configuration(
                    "alphabet contains an empty symbol".to_string(),
                ));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(SymbolSearchError::Configuration(format!(
                    "duplicate symbol in alphabet: {}",
                    symbol
                )));
            }
        }

        Ok(Self { symbols })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

impl Default for SymbolAlphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| Symbol::from(*s)).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for SymbolAlphabet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        SymbolAlphabet::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet() {
        let alphabet = SymbolAlphabet::default();
        assert_eq!(alphabet.len(), 20);
        assert!(alphabet.contains(&Symbol::from("⊕")));
        assert!(alphabet.contains(&Symbol::from("⊳")));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = SymbolAlphabet::new(["A", "B", "A"]).unwrap_err();
        assert!(matches!(err, SymbolSearchError::Configuration(_)));
    }

    #[test]
    fn test_rejects_empty() {
        let err = SymbolAlphabet::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SymbolSearchError::Configuration(_)));

        let err = SymbolAlphabet::new(["A", ""]).unwrap_err();
        assert!(matches!(err, SymbolSearchError::Configuration(_)));
    }

    #[test]
    fn test_preserves_order() {
        let alphabet = SymbolAlphabet::new(["C", "A", "B"]).unwrap();
        let glyphs: Vec<&str> = alphabet.iter().map(Symbol::as_str).collect();
        assert_eq!(glyphs, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: SymbolAlphabet = serde_json::from_str(r#"["A","B"]"#).unwrap();
        assert_eq!(ok.len(), 2);

        let bad: std::result::Result<SymbolAlphabet, _> = serde_json::from_str(r#"["A","A"]"#);
        assert!(bad.is_err());
    }
}
