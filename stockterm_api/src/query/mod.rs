mod common;
pub use self::common::{Interval, Query};

mod history;
pub use self::history::HistoryQuery;

mod snapshot;
pub use self::snapshot::SnapshotQuery;
