//! Tickets, orders, fares, and ticket filtering.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conference::ConferenceId;

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// How an order was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Stripe,
    Paypal,
    Bank,
    /// Created by staff through the admin, not a customer checkout.
    Admin,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Paypal => "paypal",
            Self::Bank => "bank",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The commercial transaction a ticket was bought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Order {
    /// Payment fully received.
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub method: PaymentMethod,
}

impl Order {
    /// Fully paid, or issued administratively.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.complete || self.method == PaymentMethod::Admin
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// Priced ticket category of a conference edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fare {
    /// Fare code, e.g. `TRSP` or `TESP`.
    pub code: String,
    /// Ticket type, e.g. `conference`, `partner`, `other`.
    pub ticket_type: String,
}

/// Conference-specific ticket details. Older tickets may lack this record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketAssignment {
    /// Email of the person the ticket is for. May be empty.
    #[serde(default)]
    pub assigned_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    /// Purchaser. `None` for tickets not (yet) attached to an account.
    #[serde(default)]
    pub owner: Option<String>,
    pub conference: ConferenceId,
    pub fare: Fare,
    #[serde(default)]
    pub order: Order,
    #[serde(default)]
    pub assignment: Option<TicketAssignment>,
}

impl Ticket {
    /// Email the ticket is assigned to, if the sub-record exists.
    #[must_use]
    pub fn assigned_to(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.assigned_to.as_str())
    }

    #[must_use]
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner.as_deref() == Some(email)
    }
}

// ---------------------------------------------------------------------------
// TicketFilter
// ---------------------------------------------------------------------------

/// Selects paid tickets of a conference, optionally by type and fare code.
///
/// A fare code ending in `%` matches every code starting with the text
/// before it (`TR%` matches `TRSP`, `TRCC`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketFilter {
    pub conference: ConferenceId,
    pub ticket_type: Option<String>,
    pub fare_code: Option<String>,
}

impl TicketFilter {
    #[must_use]
    pub const fn new(conference: ConferenceId) -> Self {
        Self {
            conference,
            ticket_type: None,
            fare_code: None,
        }
    }

    #[must_use]
    pub fn ticket_type(mut self, ticket_type: impl Into<String>) -> Self {
        self.ticket_type = Some(ticket_type.into());
        self
    }

    #[must_use]
    pub fn fare_code(mut self, code: impl Into<String>) -> Self {
        self.fare_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if ticket.conference != self.conference || !ticket.order.complete {
            return false;
        }
        if let Some(ticket_type) = &self.ticket_type {
            if &ticket.fare.ticket_type != ticket_type {
                return false;
            }
        }
        match &self.fare_code {
            Some(code) => match code.strip_suffix('%') {
                Some(prefix) => ticket.fare.code.starts_with(prefix),
                None => &ticket.fare.code == code,
            },
            None => true,
        }
    }

    /// Tickets from `tickets` accepted by this filter, in input order.
    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|t| self.matches(t)).collect()
    }
}
