//! イベントの発生源: 標準入力の行と割り込み（Ctrl-C）

use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread;

use crate::app::AppEvent;
use common::error::Error;

/// 標準入力を 1 行ずつ送るスレッドを起動する。終端で Eof を送る。
pub fn spawn_line_reader(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        forward_lines(stdin.lock(), &tx);
    });
}

/// 行を送り、終端か I/O エラーで Eof を送る。UTF-8 として不正なバイトは置換文字にする。
pub fn forward_lines(mut reader: impl BufRead, tx: &Sender<AppEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(AppEvent::Line(line)).is_err() {
                    return;
                }
            }
        }
    }
    let _ = tx.send(AppEvent::Eof);
}

/// Ctrl-C で Interrupt を送るハンドラを登録する
pub fn install_interrupt_handler(tx: Sender<AppEvent>) -> Result<(), Error> {
    ctrlc::set_handler(move || {
        let _ = tx.send(AppEvent::Interrupt);
    })
    .map_err(|e| Error::system(format!("Failed to install interrupt handler: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn collect(input: &[u8]) -> Vec<String> {
        let (tx, rx) = mpsc::channel();
        forward_lines(input, &tx);
        drop(tx);
        rx.iter()
            .map(|event| match event {
                AppEvent::Line(line) => line,
                AppEvent::Eof => "<eof>".to_string(),
                _ => "<other>".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_input() {
        let events = collect(b"\xff\nHeart\n");
        assert_eq!(events, vec!["\u{fffd}", "Heart", "<eof>"]);
    }

    #[test]
    fn test_crlf_and_last_line_without_newline() {
        let events = collect("Trái tim\r\nBlue".as_bytes());
        assert_eq!(events, vec!["Trái tim", "Blue", "<eof>"]);
    }
}
