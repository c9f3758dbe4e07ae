use crate::domain::VoiceConfig;

/// 語を読み上げる。投げっぱなしで結果は返さない（失敗は実装側でログに残す）。
pub trait SpeechPlayer: Send + Sync {
    fn speak(&self, text: &str, voice: &VoiceConfig);
}
