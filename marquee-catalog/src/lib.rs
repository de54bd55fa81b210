pub mod cinema;
pub mod hall;
pub mod movie;
pub mod payment;
pub mod review;
pub mod session;
pub mod ticket;
pub mod user;

pub use cinema::{Cinema, GeoPoint};
pub use hall::{Hall, HallFeature, HallType, Seat, SeatClass, SeatRow};
pub use movie::Movie;
pub use payment::{PaymentMethod, PaymentStatus};
pub use review::Review;
pub use session::{MovieFormat, Session, SoldSeat};
pub use ticket::{Ticket, TicketStatus};
pub use user::User;
