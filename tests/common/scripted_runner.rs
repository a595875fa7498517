//! Command runner that replays scripted outputs

use async_trait::async_trait;
use autodeps::error::{Error, Result};
use autodeps::process::{CommandOutput, CommandRunner, CommandSpec};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    /// (command-line prefix, queued outputs); the last output is sticky
    responses: Vec<(String, VecDeque<CommandOutput>)>,
    /// Prefixes whose commands fail to spawn
    spawn_failures: Vec<String>,
    calls: Vec<CommandSpec>,
}

/// Runner that matches rendered command lines by longest prefix
///
/// Unmatched commands succeed with empty output.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `output` for commands starting with `prefix`
    pub fn respond(&self, prefix: &str, output: CommandOutput) -> &Self {
        let mut script = self.script.lock().unwrap();
        if let Some((_, queue)) = script.responses.iter_mut().find(|(p, _)| p == prefix) {
            queue.push_back(output);
        } else {
            script
                .responses
                .push((prefix.to_string(), VecDeque::from([output])));
        }
        self
    }

    /// Make commands starting with `prefix` fail to spawn
    pub fn fail_spawn(&self, prefix: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .spawn_failures
            .push(prefix.to_string());
        self
    }

    /// Every command run so far, rendered
    pub fn calls(&self) -> Vec<String> {
        self.script
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Every command run so far
    pub fn specs(&self) -> Vec<CommandSpec> {
        self.script.lock().unwrap().calls.clone()
    }

    /// Whether any command starting with `prefix` ran
    pub fn ran(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    /// Position of the first command starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.starts_with(prefix))
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, _dir: &Path, command: &CommandSpec) -> Result<CommandOutput> {
        let rendered = command.to_string();
        let mut script = self.script.lock().unwrap();
        script.calls.push(command.clone());

        if script.spawn_failures.iter().any(|p| rendered.starts_with(p)) {
            return Err(Error::Spawn {
                command: rendered,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        let best = script
            .responses
            .iter_mut()
            .filter(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());

        let output = match best {
            Some((_, queue)) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some((_, queue)) => queue.front().cloned().unwrap_or_default(),
            None => CommandOutput::ok(""),
        };
        Ok(output)
    }
}
