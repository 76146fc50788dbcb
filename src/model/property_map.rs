//! PropertyMap — the key-value bag carried by relationship records.

use std::collections::HashMap;
use super::Value;

/// A map of property names to values.
pub type PropertyMap = HashMap<String, Value>;
