//! 会社ツリーの開閉状態

use std::collections::HashMap;

/// ツリーの階層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeLevel {
    Agency,
    Company,
    Deal,
}

/// 階層付きのノードキー
///
/// 階層ごとにIDの名前空間を分けるので、別階層で同じIDが使われても衝突しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub level: NodeLevel,
    pub id: String,
}

impl NodeKey {
    pub fn new(level: NodeLevel, id: impl Into<String>) -> Self {
        Self { level, id: id.into() }
    }

    pub fn agency(id: impl Into<String>) -> Self {
        Self::new(NodeLevel::Agency, id)
    }

    pub fn company(id: impl Into<String>) -> Self {
        Self::new(NodeLevel::Company, id)
    }

    pub fn deal(id: impl Into<String>) -> Self {
        Self::new(NodeLevel::Deal, id)
    }
}

/// ノードごとの開閉フラグ（未登録は閉じた状態）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandState {
    open: HashMap<NodeKey, bool>,
}

impl ExpandState {
    /// 指定キーを開いた状態で初期化
    pub fn with_open<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = NodeKey>,
    {
        Self {
            open: keys.into_iter().map(|k| (k, true)).collect(),
        }
    }

    pub fn is_open(&self, key: &NodeKey) -> bool {
        self.open.get(key).copied().unwrap_or(false)
    }

    /// 指定キーだけを反転し、反転後の状態を返す
    pub fn toggle(&mut self, key: NodeKey) -> bool {
        let entry = self.open.entry(key).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn set(&mut self, key: NodeKey, open: bool) {
        self.open.insert(key, open);
    }

    pub fn open_count(&self) -> usize {
        self.open.values().filter(|v| **v).count()
    }
}
