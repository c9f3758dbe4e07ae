//! 一時キャプションの枠（1 つだけ。新しいものが来たら古いものと期限を置き換える）

use std::time::{Duration, Instant};

pub const CAPTION_LIFETIME: Duration = Duration::from_millis(3500);

#[derive(Debug, Default)]
pub struct CaptionSlot {
    current: Option<(String, Instant)>,
}

impl CaptionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示中のものを取り消して差し替える
    pub fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.current = Some((text.into(), now + CAPTION_LIFETIME));
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|(t, _)| t.as_str())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|(_, d)| *d)
    }

    /// 期限を過ぎていたら消す。消した場合に true。
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
