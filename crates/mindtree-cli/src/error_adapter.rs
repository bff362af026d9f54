//! Error adapter for converting MindtreeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use mindtree::{
    MindtreeError,
    layout::{LayoutError, Violation},
};

/// Adapter giving a [`MindtreeError`] a diagnostic code and, where the fix
/// is known, a help line.
pub struct ErrorAdapter<'a>(pub &'a MindtreeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MindtreeError::Io(_) => "mindtree::io",
            MindtreeError::Layout(_) => "mindtree::layout",
            MindtreeError::Graph(_) => "mindtree::graph",
            MindtreeError::Snapshot(_) => "mindtree::snapshot",
            MindtreeError::Export(_) => "mindtree::export",
            MindtreeError::Config(_) => "mindtree::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            MindtreeError::Layout(LayoutError::ContractViolation(violation)) => match violation {
                Violation::Cycle { .. } => "remove one of the edges on the cycle",
                Violation::MultipleParents { .. } => "every node may have at most one parent edge",
                Violation::DuplicateNode { .. } => "give every node a unique id",
            },
            MindtreeError::Snapshot(_) => {
                "the input must be a JSON object with `nodes` and `edges` arrays"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`MindtreeError`] into a list of reportable errors.
///
/// Every variant currently yields a single entry.
pub fn to_reportables(err: &MindtreeError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}

#[cfg(test)]
mod tests {
    use mindtree::identifier::Id;

    use super::*;

    #[test]
    fn test_graph_error() {
        let err = MindtreeError::Graph("graph error".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "Graph error: graph error");
        assert_eq!(reportables[0].code().unwrap().to_string(), "mindtree::graph");
        assert!(reportables[0].help().is_none());
    }

    #[test]
    fn test_layout_error_has_help() {
        let err = MindtreeError::from(LayoutError::from(Violation::Cycle {
            nodes: vec![Id::new("a"), Id::new("b")],
        }));

        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "mindtree::layout");
        assert_eq!(
            adapter.help().unwrap().to_string(),
            "remove one of the edges on the cycle"
        );
        assert_eq!(
            adapter.to_string(),
            "layout input is not a forest: cycle through `a` -> `b`"
        );
    }

    #[test]
    fn test_report_renders() {
        let err = MindtreeError::Config("bad".to_string());
        let reporter = miette::GraphicalReportHandler::new();

        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &to_reportables(&err)[0])
            .unwrap();

        assert!(writer.contains("mindtree::config"));
    }
}
