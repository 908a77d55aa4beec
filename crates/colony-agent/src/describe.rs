use std::fmt;

/// UI-only telemetry. Scheduling never reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub last_failed_act: Option<String>,
    pub last_message: Option<String>,
}

/// Read-only snapshot of what a creature is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub task: Option<String>,
    /// Deepest node on the active act's last-ticked chain.
    pub action: Option<String>,
    pub last_failed: Option<String>,
    pub message: Option<String>,
}

impl Description {
    pub fn is_idle(&self) -> bool {
        self.task.is_none()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if let Some(task) = &self.task {
            lines.push(format!("Task: {task}"));
        }
        if let Some(action) = &self.action {
            lines.push(format!("Action: {action}"));
        }
        if let Some(failed) = &self.last_failed {
            lines.push(format!("Last failed: {failed}"));
        }
        if let Some(message) = &self.message {
            lines.push(message.clone());
        }
        if lines.is_empty() {
            return f.write_str("Idle");
        }
        f.write_str(&lines.join("\n"))
    }
}
