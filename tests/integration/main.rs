//! Integration tests for the ticket workflow and audit trail, driven
//! through the service layer against in-memory stores.

mod helpers;

mod audit_log_test;
mod ticket_workflow_test;
