use std::fmt;

use serde::Serialize;

/// Team with a single power rating.
///
/// Higher ratings are stronger. Teams are created once from the roster and
/// shared between scenarios behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Team {
    pub name: String,

    /// Real-valued strength estimate feeding the win probability model
    pub power_rating: f64,
}

impl Team {
    pub fn new(name: impl Into<String>, power_rating: f64) -> Self {
        Team {
            name: name.into(),
            power_rating,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
