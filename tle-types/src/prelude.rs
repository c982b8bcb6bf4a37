pub use crate::classification::Classification;
pub use crate::norad::NoradId;
pub use crate::time::UtcTimestamp;
pub use crate::tle::Tle;
