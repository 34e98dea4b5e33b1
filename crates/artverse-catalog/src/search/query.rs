//! Search mini-language parser.
//!
//! ```text
//! blockchain:<name> | chain:<name>   exact chain match
//! type:<image|video>                 file-type class match
//! #<id> | <digits>                   token-id substring match
//! anything else ("quoted runs" ok)   required free-text term
//! ```

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const BLOCKCHAIN_PREFIX: &str = "blockchain:";
const CHAIN_PREFIX: &str = "chain:";
const TYPE_PREFIX: &str = "type:";
const TOKEN_PREFIX: &str = "#";

/// Structured field filters. At most one value per key; the last occurrence
/// in the input wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilters {
    /// Lowercased chain name.
    pub blockchain: Option<String>,
    /// Lowercased file-type class name.
    pub file_type: Option<String>,
    /// Token id fragment, case kept.
    pub token_id: Option<String>,
}

impl FieldFilters {
    /// True when no field filter is set.
    pub fn is_empty(&self) -> bool {
        self.blockchain.is_none() && self.file_type.is_none() && self.token_id.is_none()
    }
}

/// A parsed search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// Lowercased free-text terms, in input order.
    pub terms: Vec<String>,
    /// Field filters.
    pub filters: FieldFilters,
}

impl ParsedQuery {
    /// Parse a search string. Every input is a valid query.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for token in tokenize(query) {
            parsed.classify(token);
        }
        parsed
    }

    /// True when the query neither filters nor requires any term.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.filters.is_empty()
    }

    fn classify(&mut self, token: String) {
        if let Some(rest) = token.strip_prefix(BLOCKCHAIN_PREFIX) {
            self.filters.blockchain = Some(rest.to_lowercase());
        } else if let Some(rest) = token.strip_prefix(CHAIN_PREFIX) {
            self.filters.blockchain = Some(rest.to_lowercase());
        } else if let Some(rest) = token.strip_prefix(TYPE_PREFIX) {
            self.filters.file_type = Some(rest.to_lowercase());
        } else if let Some(rest) = token.strip_prefix(TOKEN_PREFIX) {
            self.filters.token_id = Some(rest.to_string());
        } else if token.bytes().all(|b| b.is_ascii_digit()) {
            self.filters.token_id = Some(token);
        } else {
            self.terms.push(token.to_lowercase());
        }
    }
}

impl FromStr for ParsedQuery {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(chain) = &self.filters.blockchain {
            parts.push(format!("{}{}", BLOCKCHAIN_PREFIX, chain));
        }
        if let Some(file_type) = &self.filters.file_type {
            parts.push(format!("{}{}", TYPE_PREFIX, file_type));
        }
        if let Some(token_id) = &self.filters.token_id {
            parts.push(format!("{}{}", TOKEN_PREFIX, token_id));
        }
        for term in &self.terms {
            if term.chars().any(char::is_whitespace) {
                parts.push(format!("\"{}\"", term));
            } else {
                parts.push(term.clone());
            }
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Split on whitespace, keeping a double-quoted run as one token.
///
/// A quote only opens a run at the start of a token and only when a closing
/// quote follows; otherwise it is an ordinary character. Empty tokens are
/// dropped.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if let Some(quoted) = rest.strip_prefix('"') {
            if let Some(end) = quoted.find('"') {
                tokens.push(quoted[..end].to_string());
                rest = &quoted[end + 1..];
                continue;
            }
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tokens.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    tokens.retain(|t| !t.is_empty());
    tokens
}
