//! Ticket CRUD and workflow orchestration.

pub mod service;

pub use service::{CreateTicketRequest, TicketListFilter, TicketListing, TicketPatch, TicketService};
