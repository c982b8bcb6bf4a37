use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Security classification marker, column 8 of element line 1.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize,
)]
pub enum Classification {
    Unclassified,
    Classified,
    Secret,
}

impl TryFrom<char> for Classification {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        use Classification::*;
        match value {
            'U' => Ok(Unclassified),
            'C' => Ok(Classified),
            'S' => Ok(Secret),
            other => Err(other),
        }
    }
}

impl From<Classification> for char {
    fn from(value: Classification) -> Self {
        use Classification::*;
        match value {
            Unclassified => 'U',
            Classified => 'C',
            Secret => 'S',
        }
    }
}
