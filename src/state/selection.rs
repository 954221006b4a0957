//! 一括操作用の行選択

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: BTreeSet<String>,
}

impl RowSelection {
    /// 全選択 / 全解除
    pub fn select_all<I, S>(&mut self, ids: I, checked: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        if checked {
            self.selected.extend(ids.into_iter().map(Into::into));
        }
    }

    /// 1行だけ追加/削除
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// 表示中の行がすべて選択されているか
    pub fn covers<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any = false;
        for id in ids {
            any = true;
            if !self.selected.contains(id) {
                return false;
            }
        }
        any
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}
