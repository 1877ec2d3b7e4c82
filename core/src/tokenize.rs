//! Conversion of a raw argument list into a switch → value map.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ParseError;

static SWITCH_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-{1,2}[A-Za-z][A-Za-z0-9-]*").expect("static regex must compile")
});

/// Switch spelling → supplied value (empty when the switch had no value).
///
/// Ordered so that iteration, and anything derived from it, is stable.
pub type TokenMap = BTreeMap<String, String>;

/// Returns `true` if `token` should be read as a switch rather than a value.
///
/// Tokens that start like a switch (`-x`, `--name`) are keys; anything else,
/// including negative numbers such as `-1`, is a value.
pub fn is_switch_token(token: &str) -> bool {
    SWITCH_TOKEN_RE.is_match(token)
}

/// Tokenizes the arguments that follow the command name.
///
/// Each switch consumes the next token as its value unless that token is
/// itself a switch. A switch followed by another switch, or by nothing, is
/// recorded with an empty value. When a spelling repeats, the last
/// occurrence wins.
///
/// # Errors
///
/// Returns [`ParseError::NoKey`] when a value token appears with no switch
/// waiting for it.
///
/// # Examples
///
/// ```
/// use switchset_core::tokenize;
///
/// let map = tokenize(&["-i", "10.0.0.0", "-cb", "24", "--verbose"]).unwrap();
/// assert_eq!(map["-i"], "10.0.0.0");
/// assert_eq!(map["-cb"], "24");
/// assert_eq!(map["--verbose"], "");
///
/// assert!(tokenize(&["10.0.0.0/24"]).is_err());
/// ```
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Result<TokenMap, ParseError> {
    let mut map = TokenMap::new();
    let mut pending: Option<&str> = None;

    for arg in args {
        let token: &str = arg.as_ref();
        if is_switch_token(token) {
            if let Some(key) = pending.replace(token) {
                map.insert(key.to_string(), String::new());
            }
        } else if let Some(key) = pending.take() {
            map.insert(key.to_string(), token.to_string());
        } else {
            return Err(ParseError::NoKey(token.to_string()));
        }
    }

    if let Some(key) = pending {
        map.insert(key.to_string(), String::new());
    }

    debug!(keys = map.len(), "Tokenized arguments");
    Ok(map)
}
