use core::fmt;
use core::str::FromStr;
use proclab_process::ProcError;

/// One lifecycle demonstration, selected by number or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Create,
    Exec,
    Zombie,
    Orphan,
    Inspect,
    Priority,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::Create,
        Task::Exec,
        Task::Zombie,
        Task::Orphan,
        Task::Inspect,
        Task::Priority,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Task::Create => "1",
            Task::Exec => "2",
            Task::Zombie => "3a",
            Task::Orphan => "3b",
            Task::Inspect => "4",
            Task::Priority => "5",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Task::Create => "create",
            Task::Exec => "exec",
            Task::Zombie => "zombie",
            Task::Orphan => "orphan",
            Task::Inspect => "inspect",
            Task::Priority => "priority",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Task::Create => "Process Creation",
            Task::Exec => "Command Execution",
            Task::Zombie => "Zombie Process",
            Task::Orphan => "Orphan Process",
            Task::Inspect => "Process Inspection",
            Task::Priority => "Process Priority",
        }
    }
}

impl FromStr for Task {
    type Err = ProcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Task::ALL
            .into_iter()
            .find(|task| task.selector() == s || task.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known = Task::ALL
                    .iter()
                    .map(|task| format!("{}|{}", task.selector(), task.name()))
                    .collect::<Vec<_>>()
                    .join(", ");
                ProcError::invalid(format!("unknown task `{s}` (expected one of {known})"))
            })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {}: {}", self.selector(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_and_names() {
        assert_eq!("1".parse::<Task>().unwrap(), Task::Create);
        assert_eq!("exec".parse::<Task>().unwrap(), Task::Exec);
        assert_eq!("3a".parse::<Task>().unwrap(), Task::Zombie);
        assert_eq!("3b".parse::<Task>().unwrap(), Task::Orphan);
        assert_eq!(" Inspect ".parse::<Task>().unwrap(), Task::Inspect);
        assert_eq!("5".parse::<Task>().unwrap(), Task::Priority);
    }

    #[test]
    fn unknown_task_is_invalid_input() {
        for input in ["3", "6", "", "fork"] {
            assert!(matches!(
                input.parse::<Task>(),
                Err(ProcError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn header_text() {
        assert_eq!(Task::Orphan.to_string(), "Task 3b: Orphan Process");
    }
}
