pub mod columns;
pub mod deserializers;
pub mod normalizer;
pub mod pipeline;
pub mod types;
pub mod validator;

pub use pipeline::{ensure_ticket_ids, parse_import, parse_import_path};
pub use types::{ParseOutput, ParseWarning, SourceFormat, Ticket};
pub use validator::{validate_tickets, ValidationReport};
