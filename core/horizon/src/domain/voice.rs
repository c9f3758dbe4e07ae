//! 読み上げの声設定

/// ピッチ・速度は 1.0 が標準の倍率
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub pitch: f32,
    pub rate: f32,
    pub locale: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            pitch: 1.3,
            rate: 1.1,
            locale: "en-US".to_string(),
        }
    }
}
