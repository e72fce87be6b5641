use crate::commands::session::SessionState;
use crate::error::AppError;
use crate::services::report::generate_report;
use tracing::info;

/// Build the handover report from the current roster and keep it in the session
pub fn create_report(state: &SessionState, recipient: &str, deputy: &str) -> Result<String, AppError> {
    let mut session = state.lock();
    session.ensure_idle()?;

    let report = generate_report(recipient, deputy, &session.people)?;
    info!(people = session.people.len(), "report generated");
    session.report = Some(report.clone());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::{init_session, snapshot};
    use crate::error::ReportError;
    use crate::models::person::{PersonRecord, StatusTag};

    #[test]
    fn test_create_report_stores_text() {
        let state = init_session();
        state.lock().people = vec![
            PersonRecord::new("حسين", "N-6", StatusTag::Field),
            PersonRecord::new("خالد", "N-9", StatusTag::Oos),
        ];

        let report = create_report(&state, "أحمد", "").unwrap();
        assert!(report.contains("في الميدان : {2}\n- N-6 حسين\n"));
        assert_eq!(snapshot(&state).report, Some(report));
    }

    #[test]
    fn test_create_report_requires_names() {
        let state = init_session();
        let result = create_report(&state, " ", "");
        assert!(matches!(
            result,
            Err(AppError::Report(ReportError::MissingRecipient))
        ));
        assert!(snapshot(&state).report.is_none());
    }
}
