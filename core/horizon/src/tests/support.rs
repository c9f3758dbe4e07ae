//! テスト用のスタブポートと、状態機械を同期的に回すハーネス

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::adapter::stub_generation::ScriptedGeneration;
use crate::adapter::terminal::{interpret, UiCommand, ViewerTab};
use crate::domain::{AnalysisCategory, Language, VoiceConfig};
use crate::ports::outbound::SpeechPlayer;
use crate::usecase::{
    Action, AnalysisClient, Effect, SessionStore, TransientSignature, ViewStateMachine,
};
use common::error::Error;
use common::ports::outbound::{Clock, Log, LogRecord};

/// 固定時刻（advance で進める）
pub struct FixedClock(AtomicU64);

impl FixedClock {
    pub fn new(ms: u64) -> Self {
        Self(AtomicU64::new(ms))
    }

    pub fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct RecordingLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<(String, VoiceConfig)>>,
}

impl RecordingSpeech {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

impl SpeechPlayer for RecordingSpeech {
    fn speak(&self, text: &str, voice: &VoiceConfig) {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), voice.clone()));
    }
}

/// WORD_FORMATION の応答（wordFamily あり）
pub fn word_reply(term: &str) -> String {
    serde_json::json!({
        "word": term,
        "category": "WORD_FORMATION",
        "greeting": "Yes yes! Let's look at this word!",
        "pronunciation": "/hɑːt/",
        "definition": "The organ that pumps blood.",
        "etymology": "Old English heorte.",
        "wordFamily": [
            {"form": "heart", "level": "A1", "meaning": "trái tim"},
            {"form": "hearty", "level": "B2", "meaning": "nồng nhiệt", "morphology": "-y: tính chất", "register": "Informal"},
            {"form": "heartless", "level": "C1", "meaning": "nhẫn tâm", "morphology": "-less: không có"}
        ],
        "nookLibrary": [],
        "twinFlowers": [{"synonym": "core", "explanation": "center of something"}],
        "oppositeStones": ["periphery"],
        "soundEffect": "*Thump thump* 💓",
        "example": "Tom Nook has a heart of gold.",
        "trickyPairs": [{"word": "hearty", "difference": "warm vs. heartily"}],
        "quiz": {"question": "Which word means cruel?", "options": ["hearty", "heartless"], "correctAnswer": "heartless"}
    })
    .to_string()
}

/// GRAMMAR の応答
pub fn grammar_reply(topic: &str) -> String {
    serde_json::json!({
        "word": topic,
        "greeting": "Hoo! Grammar time!",
        "pronunciation": "",
        "definition": "Inversion swaps the subject and the auxiliary.",
        "etymology": "",
        "wordFamily": [],
        "nookLibrary": [],
        "twinFlowers": [],
        "oppositeStones": [],
        "soundEffect": "",
        "example": "",
        "grammar": {
            "topic": "Inversion",
            "quickMap": ["Never + aux + S + V", "Only then + aux + S + V"],
            "memoryTrick": "Negative first, helper jumps!",
            "expertTrap": "Do not invert after 'not only' in the second clause.",
            "practice": {
                "mcq": {"question": "Never ___ such a sight.", "options": ["I have seen", "have I seen"], "correctAnswer": "have I seen"},
                "rewrite": {"question": "I had hardly arrived when it rained.", "correctAnswer": "Hardly had I arrived when it rained."}
            }
        }
    })
    .to_string()
}

/// 接続系の失敗（再試行対象）
pub fn transient_error() -> Error {
    Error::http("error sending request for url (https://generativelanguage.googleapis.com/): connection reset")
}

/// 状態機械と分析クライアントを同期的につなぐハーネス
pub struct Harness {
    pub machine: ViewStateMachine,
    pub client: AnalysisClient,
    pub generation: Arc<ScriptedGeneration>,
    pub clock: Arc<FixedClock>,
    pub log: Arc<RecordingLog>,
    pub store: SessionStore,
    /// これまでに出た副作用（StartAnalysis も含む）
    pub effects: Vec<Effect>,
}

impl Harness {
    pub fn new(replies: Vec<Result<String, Error>>) -> Self {
        let generation = Arc::new(ScriptedGeneration::new(replies));
        let clock = Arc::new(FixedClock::new(1_700_000_000_000));
        let log = Arc::new(RecordingLog::default());
        let client = AnalysisClient::new(
            generation.clone(),
            TransientSignature::new().unwrap(),
            log.clone(),
        );
        let machine = ViewStateMachine::new(clock.clone(), log.clone());
        Self {
            machine,
            client,
            generation,
            clock,
            log,
            store: SessionStore::new(),
            effects: Vec::new(),
        }
    }

    /// 操作を適用する。分析が始まったらその場で実行して完了まで進める。
    pub fn send(&mut self, action: Action) {
        let effects = self.machine.dispatch(&mut self.store, action);
        self.settle(effects);
    }

    /// 入力欄に書いて送信する
    pub fn submit(&mut self, text: &str) {
        self.send(Action::EditInput(text.to_string()));
        self.send(Action::Submit);
    }

    /// 1 行を画面の入力として解釈し、得られた操作を適用する
    pub fn type_line(&mut self, line: &str) {
        let commands = interpret(line, &self.store, ViewerTab::History);
        for command in commands {
            if let UiCommand::Action(action) = command {
                self.send(action);
            }
        }
    }

    pub fn choose(&mut self, language: Language, category: AnalysisCategory) {
        self.send(Action::SelectLanguage(language));
        self.send(Action::SelectCategory(category));
    }

    fn settle(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.effects.push(effect.clone());
            if let Effect::StartAnalysis { token, request } = effect {
                let outcome = self.client.analyze(&request);
                let follow_up = self.machine.complete(&mut self.store, token, outcome);
                self.settle(follow_up);
            }
        }
    }
}
