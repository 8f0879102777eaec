//! Unit of Work: repository access plus transaction management.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, QueryFilter, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{job_match, resume, resume_analysis};
use super::repositories::{
    AnalysisRepository, AnalysisStore, JobMatchRepository, JobMatchStore, ResumeRepository,
    ResumeStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Centralized access to all repositories and transactions.
///
/// Not mockable directly because of the generic `transaction` method.
/// Tests implement it over mocked repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn resumes(&self) -> Arc<dyn ResumeRepository>;

    fn analyses(&self) -> Arc<dyn AnalysisRepository>;

    fn job_matches(&self) -> Arc<dyn JobMatchRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Commits on success and rolls back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access bound to a single open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn resumes(&self) -> TxResumeRepository<'_> {
        TxResumeRepository { txn: self.txn }
    }
}

/// Database-backed UnitOfWork.
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    resume_repo: Arc<ResumeStore>,
    analysis_repo: Arc<AnalysisStore>,
    job_match_repo: Arc<JobMatchStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            resume_repo: Arc::new(ResumeStore::new(db.clone())),
            analysis_repo: Arc::new(AnalysisStore::new(db.clone())),
            job_match_repo: Arc::new(JobMatchStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn resumes(&self) -> Arc<dyn ResumeRepository> {
        self.resume_repo.clone()
    }

    fn analyses(&self) -> Arc<dyn AnalysisRepository> {
        self.analysis_repo.clone()
    }

    fn job_matches(&self) -> Arc<dyn JobMatchRepository> {
        self.job_match_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Resume operations that span several tables.
pub struct TxResumeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxResumeRepository<'a> {
    /// Delete a user's resume together with its analysis and job matches.
    ///
    /// Returns `NotFound` if the resume does not exist or belongs to
    /// someone else.
    pub async fn delete_with_dependents(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let matches = job_match::Entity::delete_many()
            .filter(job_match::Column::ResumeId.eq(id))
            .filter(job_match::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        let analyses = resume_analysis::Entity::delete_many()
            .filter(resume_analysis::Column::ResumeId.eq(id))
            .exec(self.txn)
            .await?;

        let result = resume::Entity::delete_many()
            .filter(resume::Column::Id.eq(id))
            .filter(resume::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        // Rolls back the dependent deletes above
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::debug!(
            resume_id = %id,
            matches = matches.rows_affected,
            analyses = analyses.rows_affected,
            "Deleted resume rows"
        );
        Ok(())
    }
}

/// Run a block inside `UnitOfWork::transaction`.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
