//! 読み上げアダプタ
//!
//! TTS コマンド（既定 espeak-ng）を切り離して起動する。待たない・失敗はログのみ。

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::VoiceConfig;
use crate::ports::outbound::SpeechPlayer;
use common::ports::outbound::{Log, LogLevel, LogRecord, Process};

pub const DEFAULT_SPEECH_PROGRAM: &str = "espeak-ng";

/// espeak 系の標準値（ピッチ 0-99 の 50、速度 175 語/分）に倍率を掛ける
const BASE_PITCH: f32 = 50.0;
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

pub struct CommandSpeech {
    process: Arc<dyn Process>,
    program: PathBuf,
    log: Arc<dyn Log>,
}

impl CommandSpeech {
    pub fn new(process: Arc<dyn Process>, program: impl Into<PathBuf>, log: Arc<dyn Log>) -> Self {
        Self {
            process,
            program: program.into(),
            log,
        }
    }
}

/// espeak-ng の引数（-v ボイス -p ピッチ -s 速度 テキスト）
pub fn speech_args(text: &str, voice: &VoiceConfig) -> Vec<String> {
    let pitch = (BASE_PITCH * voice.pitch).round().clamp(0.0, 99.0) as u32;
    let speed = (BASE_WORDS_PER_MINUTE * voice.rate).round() as u32;
    vec![
        "-v".to_string(),
        voice.locale.to_lowercase(),
        "-p".to_string(),
        pitch.to_string(),
        "-s".to_string(),
        speed.to_string(),
        "--".to_string(),
        text.to_string(),
    ]
}

impl SpeechPlayer for CommandSpeech {
    fn speak(&self, text: &str, voice: &VoiceConfig) {
        let args = speech_args(text, voice);
        if let Err(e) = self.process.spawn_detached(&self.program, &args) {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "adapter", "speech", e.to_string())
                    .field("program", self.program.display().to_string()),
            );
        }
    }
}

/// 読み上げ無効時
pub struct NoopSpeech;

impl SpeechPlayer for NoopSpeech {
    fn speak(&self, _text: &str, _voice: &VoiceConfig) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProcess {
        calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
        fail: bool,
    }

    impl Process for RecordingProcess {
        fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<(), Error> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_path_buf(), args.to_vec()));
            if self.fail {
                Err(Error::io_msg("Failed to execute 'espeak-ng': not found"))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct RecordingLog {
        records: Mutex<Vec<LogRecord>>,
    }

    impl Log for RecordingLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[test]
    fn test_speech_args_default_voice() {
        let args = speech_args("Heart", &VoiceConfig::default());
        assert_eq!(args, vec!["-v", "en-us", "-p", "65", "-s", "193", "--", "Heart"]);
    }

    #[test]
    fn test_speak_spawns_program_with_term() {
        let process = Arc::new(RecordingProcess::default());
        let speech = CommandSpeech::new(process.clone(), "espeak-ng", Arc::new(RecordingLog::default()));
        speech.speak("Blue", &VoiceConfig::default());
        let calls = process.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from("espeak-ng"));
        assert_eq!(calls[0].1.last().map(|s| s.as_str()), Some("Blue"));
    }

    #[test]
    fn test_speak_failure_is_logged_not_raised() {
        let process = Arc::new(RecordingProcess {
            fail: true,
            ..Default::default()
        });
        let log = Arc::new(RecordingLog::default());
        let speech = CommandSpeech::new(process, "espeak-ng", log.clone());
        speech.speak("Blue", &VoiceConfig::default());
        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].kind.as_deref(), Some("speech"));
    }
}
