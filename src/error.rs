//! エラー型

use thiserror::Error;

/// 入力フォームの項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    ParentTask,
    Assignee,
    Deadline,
    Priority,
    EstimatedHours,
    CallDate,
    CallTime,
    Rating,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Subtask name",
            FormField::ParentTask => "Parent task",
            FormField::Assignee => "Assignee",
            FormField::Deadline => "Deadline",
            FormField::Priority => "Priority",
            FormField::EstimatedHours => "Estimated hours",
            FormField::CallDate => "Call date",
            FormField::CallTime => "Call time",
            FormField::Rating => "Rating",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 項目単位の入力エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(FormField),
    #[error("{field}: '{id}' was not found")]
    UnknownReference { field: FormField, id: String },
    #[error("{field}: '{value}' is not a valid value")]
    Invalid { field: FormField, value: String },
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            FieldError::Required(field) => *field,
            FieldError::UnknownReference { field, .. } => *field,
            FieldError::Invalid { field, .. } => *field,
        }
    }
}

/// 送信時に検出された入力エラーの一覧
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) need attention", .0.len())]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: FormField) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.to_string()).collect()
    }

    /// エラーがなければ Ok
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// 状態コンテナへのコマンド失敗
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("deal '{0}' was not found")]
    DealNotFound(String),
    #[error("subtask '{0}' was not found")]
    SubtaskNotFound(String),
    #[error("subtask '{id}' has no output requirement #{index}")]
    RequirementNotFound { id: String, index: usize },
    #[error("deal '{0}' cannot be converted before its intro call is done")]
    IntroCallPending(String),
    #[error("deal '{0}' already has an intro call")]
    IntroCallAlreadyDone(String),
    #[error("deal '{0}' has already been converted to projects")]
    AlreadyConverted(String),
    #[error(transparent)]
    Invalid(#[from] FormErrors),
}

impl CommandError {
    /// 画面表示用のメッセージ一覧
    pub fn messages(&self) -> Vec<String> {
        match self {
            CommandError::Invalid(errors) => errors.messages(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_messages() {
        let mut errors = FormErrors::default();
        errors.push(FieldError::Required(FormField::Name));
        errors.push(FieldError::UnknownReference {
            field: FormField::Assignee,
            id: "m-9".to_string(),
        });
        assert!(errors.has(FormField::Assignee));
        assert!(!errors.has(FormField::Deadline));
        assert_eq!(
            errors.messages(),
            vec![
                "Subtask name is required".to_string(),
                "Assignee: 'm-9' was not found".to_string(),
            ]
        );
        assert_eq!(errors.to_string(), "2 field(s) need attention");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FormErrors::default().into_result(3), Ok(3));
        let errors = FormErrors(vec![FieldError::Required(FormField::CallDate)]);
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_command_error_messages_unwrap_form_errors() {
        let err: CommandError = FormErrors(vec![FieldError::Required(FormField::CallTime)]).into();
        assert_eq!(err.messages(), vec!["Call time is required".to_string()]);
        let err = CommandError::DealNotFound("d-1".to_string());
        assert_eq!(err.messages(), vec!["deal 'd-1' was not found".to_string()]);
    }
}
