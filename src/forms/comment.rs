use crate::error::{TalkError, TalkResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentForm {
    pub commenter_name: String,
    pub content: String,
}

impl CommentForm {
    pub fn new(commenter_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            commenter_name: commenter_name.into(),
            content: content.into(),
        }
    }

    /// Name is checked before content.
    pub fn validate(&self) -> TalkResult<()> {
        if self.commenter_name.trim().is_empty() {
            return Err(TalkError::InvalidInput("Please enter your name".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(TalkError::InvalidInput("Please enter a comment".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CcrForm {
    pub ccr_number: String,
}

impl CcrForm {
    pub fn validate(&self) -> TalkResult<()> {
        if self.ccr_number.trim().is_empty() {
            return Err(TalkError::InvalidInput("CCR number is required".to_string()));
        }
        Ok(())
    }
}
