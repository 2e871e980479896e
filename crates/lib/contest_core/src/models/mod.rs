//! Domain models for a ticket contest session.
//!
//! Wire shapes use camelCase keys so that sessions, messages and ticket
//! snapshots serialize the same way the browser client and the chat relay
//! expect them.

pub mod contact;
pub mod evidence;
pub mod message;
pub mod reason;
pub mod step;
pub mod ticket;

pub use contact::{ContactInfo, ContactUpdate};
pub use evidence::{Evidence, EvidenceFile, EvidenceKind, EvidenceUpdate};
pub use message::{Message, MessageMetadata, NewMessage, Role};
pub use reason::ContestReason;
pub use step::Step;
pub use ticket::{Ticket, TicketField, TicketUpdate};
