//! Workflow files the gateway knows how to install into a repository.

/// A workflow document together with where and how it is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowTemplate {
    pub path: &'static str,
    pub content: &'static str,
    pub commit_message: &'static str,
}

/// CodeQL code scanning on pushes and pull requests to `main`
pub const CODEQL: WorkflowTemplate = WorkflowTemplate {
    path: ".github/workflows/codeql.yml",
    content: include_str!("../templates/codeql.yml"),
    commit_message: "Add CodeQL workflow",
};
