#![allow(dead_code)]

use ghostscramble_core::{Clock, UserPrompter};
use std::cell::Cell;
use std::collections::VecDeque;

/// Prompter answering confirmations from a script and recording everything.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    pub confirms: Vec<String>,
    pub alerts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl UserPrompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answers
            .pop_front()
            .expect("unexpected confirmation request")
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Clock frozen at one millisecond value and date.
pub struct FrozenClock {
    pub now_ms: Cell<i64>,
    pub date: &'static str,
}

impl FrozenClock {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            date: "2026-03-14",
        }
    }
}

impl Clock for FrozenClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    fn today(&self) -> String {
        self.date.to_string()
    }
}
