use std::collections::VecDeque;

use tracing::debug;

pub const MAX_TRANSCRIPT_LINES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealHandle(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct RevealTask {
    handle: RevealHandle,
    text: String,
    total_chars: usize,
    visible_chars: usize,
    started_ms: Option<f64>,
}

impl RevealTask {
    fn new(handle: RevealHandle, text: String) -> Self {
        let total_chars = text.chars().count();
        Self {
            handle,
            text,
            total_chars,
            visible_chars: total_chars.min(1),
            started_ms: None,
        }
    }

    pub fn handle(&self) -> RevealHandle {
        self.handle
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_complete(&self) -> bool {
        self.visible_chars >= self.total_chars
    }

    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.visible_chars) {
            Some((byte_index, _)) => &self.text[..byte_index],
            None => &self.text,
        }
    }

    fn advance(&mut self, now_ms: f64, ms_per_char: f64) {
        let started = *self.started_ms.get_or_insert(now_ms);
        if ms_per_char <= 0.0 {
            self.visible_chars = self.total_chars;
            return;
        }
        let elapsed = (now_ms - started).max(0.0);
        let revealed = 1 + (elapsed / ms_per_char).floor() as usize;
        self.visible_chars = revealed.min(self.total_chars);
    }
}

#[derive(Debug, Clone)]
pub struct Narrator {
    ms_per_char: f64,
    next_handle: u64,
    active: Option<RevealTask>,
    transcript: VecDeque<String>,
}

impl Narrator {
    pub fn new(ms_per_char: f64) -> Self {
        Self {
            ms_per_char,
            next_handle: 0,
            active: None,
            transcript: VecDeque::new(),
        }
    }

    pub fn start(&mut self, text: impl Into<String>) -> RevealHandle {
        if let Some(previous) = self.active.take() {
            if !previous.is_complete() {
                debug!(handle = previous.handle.0, "narration_cancelled");
            }
        }

        let text = text.into();
        let handle = RevealHandle(self.next_handle);
        self.next_handle += 1;
        push_bounded(&mut self.transcript, text.clone(), MAX_TRANSCRIPT_LINES);
        self.active = Some(RevealTask::new(handle, text));
        handle
    }

    pub fn cancel(&mut self, handle: RevealHandle) -> bool {
        if self.active.as_ref().map(RevealTask::handle) == Some(handle) {
            self.active = None;
            return true;
        }
        false
    }

    pub fn advance(&mut self, now_ms: f64) {
        if let Some(task) = self.active.as_mut() {
            task.advance(now_ms, self.ms_per_char);
        }
    }

    pub fn finish(&mut self) {
        if let Some(task) = self.active.as_mut() {
            task.visible_chars = task.total_chars;
        }
    }

    pub fn active(&self) -> Option<&RevealTask> {
        self.active.as_ref()
    }

    pub fn is_revealing(&self) -> bool {
        self.active.as_ref().is_some_and(|task| !task.is_complete())
    }

    pub fn visible_text(&self) -> &str {
        self.active.as_ref().map_or("", RevealTask::visible_text)
    }

    pub fn transcript(&self) -> impl Iterator<Item = &str> {
        self.transcript.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.transcript.clear();
    }
}

fn push_bounded(queue: &mut VecDeque<String>, value: String, max_len: usize) {
    if queue.len() == max_len {
        queue.pop_front();
    }
    queue.push_back(value);
}
