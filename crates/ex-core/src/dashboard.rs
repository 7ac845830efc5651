use crate::catalog::Catalog;
use crate::metrics::{calculate_revenue_share, format_currency, RevenueShare};
use crate::types::enums::{Role, TicketStatus};
use crate::types::event::EventRecord;
use crate::types::identity::SessionIdentity;
use crate::types::ids::{TicketId, UserId};
use crate::types::ticket::Ticket;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

const SAMPLE_TICKET_EVENT: &str = "event-2";
const SAMPLE_TICKET_QUANTITY: u32 = 2;
const SAMPLE_CREATED_EVENT: &str = "event-3";
const SAMPLE_CREATED_SOLD: u32 = 215;
const SAMPLE_CREATED_REVENUE: f64 = 214785.0;

#[derive(Debug, Default)]
pub struct TicketLedger {
    tickets: Vec<Ticket>,
}

impl TicketLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ticket: Ticket) {
        self.tickets.push(ticket);
    }

    pub fn for_holder<'a>(&'a self, holder: &'a UserId) -> impl Iterator<Item = &'a Ticket> {
        self.tickets
            .iter()
            .filter(move |ticket| &ticket.holder_id == holder)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TicketLine {
    pub ticket: Ticket,
    pub total: f64,
    pub total_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedEventStats {
    pub event: EventRecord,
    pub tickets_sold: u32,
    pub tickets_total: u32,
    pub revenue: f64,
    pub revenue_label: String,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentDashboard {
    pub tickets: Vec<TicketLine>,
    pub upcoming_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrganizerDashboard {
    pub events: Vec<CreatedEventStats>,
    pub total_tickets_sold: u32,
    pub total_revenue: f64,
    pub total_revenue_label: String,
    pub revenue_share: RevenueShare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub welcome: String,
    pub email: String,
    pub role: Role,
    pub account_type: String,
    pub student: Option<StudentDashboard>,
    pub organizer: Option<OrganizerDashboard>,
}

impl Dashboard {
    /// Sample entries are shown only when their events are in the catalog.
    pub fn build(identity: &SessionIdentity, catalog: &Catalog, ledger: &TicketLedger) -> Self {
        let (student, organizer) = match identity.role {
            Role::Student => (Some(student_view(identity, catalog, ledger)), None),
            Role::Organizer => (None, Some(organizer_view(catalog))),
        };
        Self {
            welcome: format!("Welcome, {}", identity.name),
            email: identity.email.clone(),
            role: identity.role,
            account_type: identity.role.label().to_string(),
            student,
            organizer,
        }
    }
}

fn student_view(
    identity: &SessionIdentity,
    catalog: &Catalog,
    ledger: &TicketLedger,
) -> StudentDashboard {
    let lines: Vec<TicketLine> = sample_ticket(identity, catalog)
        .into_iter()
        .chain(ledger.for_holder(&identity.id).cloned())
        .map(|ticket| {
            let total = ticket.total();
            TicketLine {
                total,
                total_label: format_currency(total),
                ticket,
            }
        })
        .collect();
    let upcoming_count = lines
        .iter()
        .filter(|line| line.ticket.status == TicketStatus::Confirmed)
        .count();
    StudentDashboard {
        tickets: lines,
        upcoming_count,
    }
}

fn organizer_view(catalog: &Catalog) -> OrganizerDashboard {
    let events: Vec<CreatedEventStats> = catalog
        .find(SAMPLE_CREATED_EVENT)
        .map(|event| CreatedEventStats {
            tickets_total: event.seats.total,
            tickets_sold: SAMPLE_CREATED_SOLD,
            revenue: SAMPLE_CREATED_REVENUE,
            revenue_label: format_currency(SAMPLE_CREATED_REVENUE),
            price_label: format_currency(event.price),
            event: event.clone(),
        })
        .into_iter()
        .collect();
    let total_tickets_sold = events.iter().map(|stats| stats.tickets_sold).sum();
    let total_revenue: f64 = events.iter().map(|stats| stats.revenue).sum();
    OrganizerDashboard {
        events,
        total_tickets_sold,
        total_revenue,
        total_revenue_label: format_currency(total_revenue),
        revenue_share: calculate_revenue_share(total_revenue),
    }
}

fn sample_ticket(identity: &SessionIdentity, catalog: &Catalog) -> Option<Ticket> {
    let event = catalog.find(SAMPLE_TICKET_EVENT)?;
    Some(issue_ticket(
        identity,
        event,
        TicketId::from_str("ticket-1").ok()?,
        SAMPLE_TICKET_QUANTITY,
        NaiveDate::from_ymd_opt(2025, 5, 5)?,
    ))
}

fn issue_ticket(
    identity: &SessionIdentity,
    event: &EventRecord,
    id: TicketId,
    quantity: u32,
    purchase_date: NaiveDate,
) -> Ticket {
    Ticket {
        id,
        holder_id: identity.id.clone(),
        event_id: event.id.clone(),
        event_title: event.title.clone(),
        event_date: event.date,
        event_location: event.location.clone(),
        event_college: event.college.clone(),
        quantity,
        unit_price: event.price,
        purchase_date,
        status: TicketStatus::Confirmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ids::OrganizerId;

    fn identity(role: Role) -> SessionIdentity {
        SessionIdentity {
            id: UserId::from_str("user-0a1b2c3d4").unwrap(),
            name: "asha".to_string(),
            email: "asha@college.edu".to_string(),
            role,
            bio: None,
            college: None,
        }
    }

    #[test]
    fn test_student_dashboard_has_sample_ticket() {
        let catalog = Catalog::seed().unwrap();
        let dashboard =
            Dashboard::build(&identity(Role::Student), &catalog, &TicketLedger::new());
        assert_eq!(dashboard.welcome, "Welcome, asha");
        assert_eq!(dashboard.account_type, "Student");
        assert!(dashboard.organizer.is_none());

        let student = dashboard.student.unwrap();
        assert_eq!(student.upcoming_count, 1);
        let line = &student.tickets[0];
        assert_eq!(line.ticket.event_title, "Cultural Night");
        assert_eq!(line.total, 598.0);
        assert_eq!(line.total_label, "₹598");
    }

    #[test]
    fn test_student_dashboard_includes_ledger_tickets_for_holder_only() {
        let catalog = Catalog::seed().unwrap();
        let me = identity(Role::Student);
        let mut ledger = TicketLedger::new();
        let mut mine = sample_ticket(&me, &catalog).unwrap();
        mine.id = TicketId::generate();
        mine.quantity = 1;
        let mut theirs = mine.clone();
        theirs.holder_id = UserId::from_str("user-someoneelse").unwrap();
        ledger.record(mine);
        ledger.record(theirs);

        let dashboard = Dashboard::build(&me, &catalog, &ledger);
        assert_eq!(dashboard.student.unwrap().tickets.len(), 2);
    }

    #[test]
    fn test_organizer_dashboard_totals() {
        let catalog = Catalog::seed().unwrap();
        let dashboard =
            Dashboard::build(&identity(Role::Organizer), &catalog, &TicketLedger::new());
        assert_eq!(dashboard.account_type, "Event Organizer");
        let organizer = dashboard.organizer.unwrap();
        assert_eq!(organizer.total_tickets_sold, 215);
        assert_eq!(organizer.total_revenue_label, "₹2,14,785");
        assert_eq!(organizer.events[0].tickets_total, 300);
        assert_eq!(organizer.events[0].price_label, "₹999");
        assert_eq!(organizer.revenue_share.percentage, 5);
        assert!((organizer.revenue_share.share - 10739.25).abs() < 1e-6);
    }

    fn sparse_catalog() -> Catalog {
        let catalog = Catalog::seed().unwrap();
        let mut lone = catalog.events()[0].clone();
        lone.organizer_id = OrganizerId::from_str("org-1").unwrap();
        Catalog::new(vec![lone]).unwrap()
    }

    #[test]
    fn test_student_dashboard_on_sparse_catalog_lists_ledger_tickets() {
        let catalog = sparse_catalog();
        let me = identity(Role::Student);
        let mut ledger = TicketLedger::new();
        let event = &catalog.events()[0];
        let purchased = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        ledger.record(issue_ticket(&me, event, TicketId::generate(), 3, purchased));

        let student = Dashboard::build(&me, &catalog, &ledger).student.unwrap();
        assert_eq!(student.tickets.len(), 1);
        assert_eq!(student.tickets[0].ticket.event_title, "TechFest 2025");
        assert_eq!(student.tickets[0].total_label, "₹1,497");
        assert_eq!(student.upcoming_count, 1);
    }

    #[test]
    fn test_organizer_dashboard_on_sparse_catalog_is_empty() {
        let dashboard =
            Dashboard::build(&identity(Role::Organizer), &sparse_catalog(), &TicketLedger::new());
        let organizer = dashboard.organizer.unwrap();
        assert!(organizer.events.is_empty());
        assert_eq!(organizer.total_tickets_sold, 0);
        assert_eq!(organizer.total_revenue_label, "₹0");
    }
}
