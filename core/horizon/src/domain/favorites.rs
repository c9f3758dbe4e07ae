//! お気に入り（語の集合。有無だけが状態）

/// 一意な語の集合。表示は追加順。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    terms: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// 完全一致で判定する
    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// 有無を反転する。追加した場合に true。
    pub fn toggle(&mut self, term: &str) -> bool {
        if let Some(pos) = self.terms.iter().position(|t| t == term) {
            self.terms.remove(pos);
            false
        } else {
            self.terms.push(term.to_string());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
