use std::fmt;

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


// One of the two sides in chess and Clobber. Serialized as "white"/"black" on the wire.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Force::White => write!(f, "white"),
            Force::Black => write!(f, "black"),
        }
    }
}
