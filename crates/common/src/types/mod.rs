use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload returned by the third-party quote endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: i64,
    pub quote: String,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote{{id={}, quote='{}'}}", self.id, self.quote)
    }
}
