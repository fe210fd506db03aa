use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use drupalci::errors::Result;
use drupalci::exec::{CommandBackend, Invocation, InvocationOutput};
use drupalci::types::Stage;

/// A fake command backend that:
/// - records every invocation it is handed, in order
/// - answers with success unless a canned response was registered for the
///   invocation's stage.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<Invocation>>>,
    responses: Arc<Mutex<HashMap<Stage, InvocationOutput>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `stage` exit with `exit_code`.
    pub fn fail_stage(self, stage: Stage, exit_code: i32, stderr: &str) -> Self {
        self.respond(stage, InvocationOutput::failure(exit_code, stderr))
    }

    /// Answer every invocation of `stage` with `output`.
    pub fn respond(self, stage: Stage, output: InvocationOutput) -> Self {
        self.responses.lock().unwrap().insert(stage, output);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.calls().iter().map(|c| c.stage).collect()
    }

    /// `program argv...` for each call, handy for exact sequence assertions.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }
}

impl CommandBackend for RecordingBackend {
    fn invoke(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<InvocationOutput>> + Send + '_>> {
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&invocation.stage)
            .cloned()
            .unwrap_or_default();
        self.calls.lock().unwrap().push(invocation);

        Box::pin(async move { Ok(response) })
    }
}
