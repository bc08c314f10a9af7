//! In-Memory Clipboard - 测试与演示用的剪贴板

use std::sync::{Arc, Mutex};

use crate::application::ports::ClipboardPort;

/// 内存剪贴板
pub struct InMemoryClipboard {
    last: Mutex<Option<String>>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 最近一次写入的文本
    pub fn last_copied(&self) -> Option<String> {
        self.last.lock().unwrap().clone()
    }
}

impl ClipboardPort for InMemoryClipboard {
    fn write_text(&self, text: &str) {
        *self.last.lock().unwrap() = Some(text.to_string());
    }
}

impl Default for InMemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}
