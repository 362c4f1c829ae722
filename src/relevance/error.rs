use sea_orm::{DbErr, SqlErr};

/// 关联管理错误
#[derive(Debug, thiserror::Error)]
pub enum RelevanceError {
    /// 关联类型为空
    #[error("relation key must not be empty")]
    EmptyKey,

    /// 持久层错误，原样透传
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl RelevanceError {
    /// 是否违反了 (key, first_id, second_id) 唯一约束
    pub fn is_duplicate(&self) -> bool {
        match self {
            Self::Database(err) => matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))),
            Self::EmptyKey => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelevanceError>;
