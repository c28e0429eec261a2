//! The task runner the categorizer registers into

use serde::Serialize;

/// The registration primitive of a host task runner
///
/// The categorizer wraps one of these and forwards every explicit task to it,
/// followed by the category tasks produced at finalization.
pub trait TaskHost {
    /// Task body accepted by the runner
    type Body;

    /// Value the runner returns for a registered task
    type Handle;

    /// Registers `name` with the given dependencies and optional body
    fn register(&mut self, name: &str, dependencies: Vec<String>, body: Option<Self::Body>)
        -> Self::Handle;
}

impl<H: TaskHost + ?Sized> TaskHost for &mut H {
    type Body = H::Body;
    type Handle = H::Handle;

    fn register(
        &mut self,
        name: &str,
        dependencies: Vec<String>,
        body: Option<Self::Body>,
    ) -> Self::Handle {
        (**self).register(name, dependencies, body)
    }
}

/// A task as recorded by [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredTask<B> {
    pub name: String,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<B>,
}

/// In-memory host that records registrations in order
///
/// Registering a name twice replaces the earlier definition in place, the
/// way a task runner keeps the last definition of a task.
#[derive(Debug, Clone)]
pub struct RecordingHost<B = String> {
    tasks: Vec<RegisteredTask<B>>,
    calls: usize,
}

impl<B> Default for RecordingHost<B> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            calls: 0,
        }
    }
}

impl<B> RecordingHost<B> {
    /// Creates an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns recorded tasks in first-registration order
    pub fn tasks(&self) -> &[RegisteredTask<B>] {
        &self.tasks
    }

    /// Looks up a recorded task by name
    pub fn get(&self, name: &str) -> Option<&RegisteredTask<B>> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Returns the number of `register` calls received, including replacements
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Returns the number of distinct tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if nothing was registered
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Consumes the host, returning the recorded tasks
    pub fn into_tasks(self) -> Vec<RegisteredTask<B>> {
        self.tasks
    }
}

impl<B> TaskHost for RecordingHost<B> {
    type Body = B;
    /// Position of the task in [`RecordingHost::tasks`]
    type Handle = usize;

    fn register(&mut self, name: &str, dependencies: Vec<String>, body: Option<B>) -> usize {
        self.calls += 1;
        let task = RegisteredTask {
            name: name.to_string(),
            dependencies,
            body,
        };

        match self.tasks.iter().position(|t| t.name == name) {
            Some(idx) => {
                self.tasks[idx] = task;
                idx
            }
            None => {
                self.tasks.push(task);
                self.tasks.len() - 1
            }
        }
    }
}
