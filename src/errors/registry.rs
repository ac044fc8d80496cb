//! Constant table mapping error keys to their message templates.

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::errors::ErrorKind;

lazy_static! {
    pub static ref ERRORS: HashMap<&'static str, &'static str> = ErrorKind::ALL
        .iter()
        .map(|kind| (kind.key(), kind.template()))
        .collect();
}

/// Returns the message template registered under `key`.
pub fn lookup(key: &str) -> Option<&'static str> {
    ERRORS.get(key).copied()
}
