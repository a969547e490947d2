//! A scripted runner that records commands instead of executing them.

use external::{CommandError, Runner};
use std::{cell::RefCell, collections::VecDeque};

type Response = Result<String, String>;

/// Replies to commands with scripted responses, and records every invocation as a
/// `cmd arg1 arg2 ...` line.
///
/// A command line is answered by the first registered rule that it starts with.
/// Each rule replies with its queued responses in turn, repeating the last one once
/// the queue is down to it. Commands without a rule succeed with no output.
#[derive(Default)]
pub struct FakeRunner {
    rules: RefCell<Vec<(String, VecDeque<Response>)>>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self { FakeRunner::default() }

    /// Queues a successful response for commands starting with `prefix`.
    pub fn ok(self, prefix: &str, output: &str) -> Self { self.respond(prefix, Ok(output.into())) }

    /// Queues a failed response for commands starting with `prefix`.
    pub fn fail(self, prefix: &str, output: &str) -> Self {
        self.respond(prefix, Err(output.into()))
    }

    fn respond(self, prefix: &str, response: Response) -> Self {
        {
            let mut rules = self.rules.borrow_mut();
            match rules.iter_mut().find(|(rule, _)| rule == prefix) {
                Some((_, queue)) => queue.push_back(response),
                None => rules.push((prefix.into(), vec![response].into())),
            }
        }

        self
    }

    pub fn calls(&self) -> Vec<String> { self.calls.borrow().clone() }

    /// The number of recorded commands which start with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|call| call.starts_with(prefix)).count()
    }
}

impl Runner for FakeRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String, CommandError> {
        let line = format!("{} {}", cmd, args.join(" "));
        self.calls.borrow_mut().push(line.clone());

        let response = {
            let mut rules = self.rules.borrow_mut();
            rules.iter_mut().find(|(prefix, _)| line.starts_with(prefix.as_str())).and_then(
                |(_, queue)| {
                    if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
                },
            )
        };

        match response {
            Some(Ok(output)) => Ok(output),
            Some(Err(output)) => Err(CommandError::failed(cmd, "1", output)),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_runner_replays_responses() {
        let runner = FakeRunner::new().fail("partprobe", "busy").ok("partprobe", "").ok("lsblk", "x");

        assert!(runner.run("partprobe", &["/dev/sda"]).is_err());
        assert!(runner.run("partprobe", &["/dev/sda"]).is_ok());
        assert!(runner.run("partprobe", &["/dev/sda"]).is_ok());
        assert_eq!(runner.run("lsblk", &["-l"]).unwrap(), "x");
        assert_eq!(runner.run("udevadm", &["settle"]).unwrap(), "");
        assert_eq!(runner.count("partprobe /dev/sda"), 3);
        assert_eq!(runner.calls().last().map(String::as_str), Some("udevadm settle"));
    }
}
