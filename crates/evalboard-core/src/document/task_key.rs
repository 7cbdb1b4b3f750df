//! Classification of task keys relative to a benchmark

/// How a task key relates to the benchmark being aggregated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKeyMatch<'a> {
    /// The key is the benchmark name itself
    Exact,
    /// `{benchmark}_p...`, a prompt variant
    PromptVariant,
    /// `{benchmark}_{code}` for a declared subtask, carrying its display name
    Subtask(&'a str),
}

impl TaskKeyMatch<'_> {
    /// Resolve a document key against a benchmark.
    ///
    /// Only `Exact` and `PromptVariant` are produced here; subtask keys are
    /// looked up by code with [`TaskKeyMatch::subtask_key`], since any code
    /// may follow the benchmark name.
    pub fn classify(task_key: &str, benchmark: &str) -> Option<TaskKeyMatch<'static>> {
        let rest = task_key.strip_prefix(benchmark)?;
        if rest.is_empty() {
            return Some(TaskKeyMatch::Exact);
        }
        rest.strip_prefix("_p")?;
        Some(TaskKeyMatch::PromptVariant)
    }

    /// Document key of a subtask
    pub fn subtask_key(benchmark: &str, code: &str) -> String {
        format!("{}_{}", benchmark, code)
    }
}
