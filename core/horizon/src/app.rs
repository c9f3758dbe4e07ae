//! 対話ループ
//!
//! 1 本のチャネルで入力行・割り込み・分析の完了を受け取り、状態機械を進めて画面を描き直す。
//! 分析は 1 件ごとにワーカースレッドで実行し、結果は RoundToken 付きで戻す。
//! キャプションの期限は recv_timeout で待つ。

use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::adapter::terminal::{interpret, notice_text, render_screen, CaptionSlot, UiCommand, ViewerTab};
use crate::domain::{AnalysisResult, VoiceConfig};
use crate::ports::outbound::SpeechPlayer;
use crate::usecase::{Action, AnalysisClient, Effect, RoundToken, SessionStore, ViewStateMachine};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};

/// ループが受け取るイベント
pub enum AppEvent {
    Line(String),
    /// 標準入力の終端
    Eof,
    Interrupt,
    Completed {
        token: RoundToken,
        outcome: Result<AnalysisResult, Error>,
    },
}

pub struct HorizonApp {
    machine: ViewStateMachine,
    client: Arc<AnalysisClient>,
    speech: Arc<dyn SpeechPlayer>,
    voice: VoiceConfig,
    log: Arc<dyn Log>,
}

/// ループ 1 回分の表示側の状態
struct Screen {
    store: SessionStore,
    caption: CaptionSlot,
    tab: ViewerTab,
}

impl HorizonApp {
    pub fn new(
        machine: ViewStateMachine,
        client: Arc<AnalysisClient>,
        speech: Arc<dyn SpeechPlayer>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            machine,
            client,
            speech,
            voice: VoiceConfig::default(),
            log,
        }
    }

    /// ループを回す。Interrupt か :quit で終了。
    /// 入力の終端では、実行中の分析があればその完了を待ってから終了する。
    pub fn run(
        &self,
        initial: Vec<Action>,
        tx: Sender<AppEvent>,
        rx: Receiver<AppEvent>,
        out: &mut dyn Write,
    ) -> Result<i32, Error> {
        let mut screen = Screen {
            store: SessionStore::new(),
            caption: CaptionSlot::new(),
            tab: ViewerTab::default(),
        };
        for action in initial {
            let effects = self.machine.dispatch(&mut screen.store, action);
            self.apply(effects, &mut screen, &tx);
        }
        draw(out, &screen)?;

        let mut input_closed = false;
        loop {
            let event = match screen.caption.deadline() {
                Some(deadline) => {
                    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                        Ok(event) => event,
                        Err(RecvTimeoutError::Timeout) => {
                            if screen.caption.expire(Instant::now()) {
                                draw(out, &screen)?;
                            }
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => return Ok(0),
                    }
                }
                None => match rx.recv() {
                    Ok(event) => event,
                    Err(_) => return Ok(0),
                },
            };

            match event {
                AppEvent::Line(line) => {
                    for command in interpret(&line, &screen.store, screen.tab) {
                        match command {
                            UiCommand::Quit => {
                                self.log_lifecycle("quit");
                                return Ok(0);
                            }
                            UiCommand::SwitchTab(tab) => screen.tab = tab,
                            UiCommand::Action(action) => {
                                let effects = self.machine.dispatch(&mut screen.store, action);
                                self.apply(effects, &mut screen, &tx);
                            }
                        }
                    }
                }
                AppEvent::Completed { token, outcome } => {
                    let effects = self.machine.complete(&mut screen.store, token, outcome);
                    self.apply(effects, &mut screen, &tx);
                }
                AppEvent::Eof => {
                    input_closed = true;
                }
                AppEvent::Interrupt => {
                    self.log_lifecycle("interrupted");
                    return Ok(0);
                }
            }

            screen.caption.expire(Instant::now());
            draw(out, &screen)?;
            if input_closed && !screen.store.is_loading() {
                self.log_lifecycle("input closed");
                return Ok(0);
            }
        }
    }

    fn apply(&self, effects: Vec<Effect>, screen: &mut Screen, tx: &Sender<AppEvent>) {
        for effect in effects {
            match effect {
                Effect::Notice(notice) => {
                    let text = notice_text(&notice, screen.store.language());
                    screen.caption.show(text, Instant::now());
                }
                Effect::Speak(text) => self.speech.speak(&text, &self.voice),
                Effect::StartAnalysis { token, request } => {
                    let client = Arc::clone(&self.client);
                    let tx = tx.clone();
                    thread::spawn(move || {
                        let outcome = client.analyze(&request);
                        let _ = tx.send(AppEvent::Completed { token, outcome });
                    });
                }
            }
        }
    }

    fn log_lifecycle(&self, msg: &str) {
        let _ = self
            .log
            .log(&LogRecord::new(LogLevel::Info, "app", "lifecycle", msg));
    }
}

fn draw(out: &mut dyn Write, screen: &Screen) -> Result<(), Error> {
    let text = render_screen(&screen.store, screen.tab, screen.caption.text());
    write!(out, "\n{}> ", text)
        .and_then(|_| out.flush())
        .map_err(|e| Error::io_msg(format!("Failed to write screen: {}", e)))
}
