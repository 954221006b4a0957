//! モーダル/パネルの表示状態

/// Closed → Open(entity) → Closed
///
/// 同じ種類のモーダルは画面ごとに一つだけ開く。
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Closed,
    Open(T),
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        ModalState::Closed
    }
}

impl<T> ModalState<T> {
    /// 開いている場合は対象を差し替える
    pub fn open(&mut self, entity: T) {
        *self = ModalState::Open(entity);
    }

    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            ModalState::Open(entity) => Some(entity),
            ModalState::Closed => None,
        }
    }

    /// 確定操作：成功なら閉じる、失敗なら開いたままエラーを返す
    pub fn confirm<R, E, F>(&mut self, action: F) -> Option<Result<R, E>>
    where
        F: FnOnce(&T) -> Result<R, E>,
    {
        let result = match self {
            ModalState::Open(entity) => action(entity),
            ModalState::Closed => return None,
        };
        if result.is_ok() {
            self.close();
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: &'static str,
        name: &'static str,
    }

    #[test]
    fn test_open_close_reopen_shows_new_entity() {
        let mut modal = ModalState::default();
        modal.open(Item { id: "x", name: "X" });
        assert_eq!(modal.selected().map(|i| i.name), Some("X"));
        modal.close();
        assert_eq!(modal.selected(), None);
        modal.open(Item { id: "y", name: "Y" });
        assert_eq!(modal.selected().map(|i| i.id), Some("y"));
        assert_eq!(modal.selected().map(|i| i.name), Some("Y"));
    }

    #[test]
    fn test_open_replaces_current() {
        let mut modal = ModalState::Open("a");
        modal.open("b");
        assert_eq!(modal, ModalState::Open("b"));
    }

    #[test]
    fn test_confirm_success_closes() {
        let mut modal = ModalState::Open(5);
        let result: Option<Result<i32, ()>> = modal.confirm(|n| Ok(n * 2));
        assert_eq!(result, Some(Ok(10)));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_confirm_failure_keeps_open() {
        let mut modal = ModalState::Open(5);
        let result: Option<Result<(), &str>> = modal.confirm(|_| Err("missing"));
        assert_eq!(result, Some(Err("missing")));
        assert_eq!(modal.selected(), Some(&5));
    }

    #[test]
    fn test_confirm_on_closed_does_nothing() {
        let mut modal: ModalState<i32> = ModalState::Closed;
        let mut called = false;
        let result: Option<Result<(), ()>> = modal.confirm(|_| {
            called = true;
            Ok(())
        });
        assert!(result.is_none());
        assert!(!called);
    }
}
