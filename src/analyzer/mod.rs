pub mod charts;
pub mod insights;
pub mod stats;

pub use charts::{
    get_company_data, get_escalated_chart_data, get_module_chart_data, get_priority_chart_data,
    get_process_chart_data, get_status_chart_data, get_tags_chart_data, get_timeline_data,
    get_top_requesters, get_type_chart_data, ChartData, CompanyData,
};
pub use insights::generate_insights;
pub use stats::{process_ticket_data, TicketStats};
