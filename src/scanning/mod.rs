pub mod controller;
pub mod loop_worker;
pub mod mailbox;
pub mod reducer;
pub mod sink;
pub mod state;
pub mod window;

pub use controller::{ScanComponents, ScannerController, ScannerSnapshot};
pub use mailbox::{batch_mailbox, BatchInbox, BatchPoster, Delivery};
pub use reducer::{dedup_by_payload, reduce_batch, select_candidate, ScanVerdict};
pub use sink::{AcceptedScan, ChannelSink, LoggingSink, ResultSink};
pub use state::{ScanStatus, ScannerState};
pub use window::{ScanWindowHandle, ScanWindowTracker};
