pub mod lifecycle;
pub mod pricing;
pub mod purchase;
pub mod seatmap;

pub use lifecycle::{LifecycleError, TicketDesk};
pub use purchase::{BookingError, BookingProcess, PurchaseReceipt, SeatFailure, SeatFailureReason};
pub use seatmap::{SeatMap, SeatMapError, SeatRef};
