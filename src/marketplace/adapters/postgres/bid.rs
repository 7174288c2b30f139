//! `PostgreSQL` bid repository.

use super::{
    models::{bid_to_new_row, row_to_bid, BidRow},
    schema::bids,
    task::MarketplacePgPool,
};
use crate::identity::domain::UserId;
use crate::marketplace::{
    domain::{Bid, BidId, TaskId},
    ports::{BidRepository, BidRepositoryError, BidRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

// Required by `Connection::transaction` so rollback failures surface as
// persistence errors.
impl From<DieselError> for BidRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed bid repository.
#[derive(Debug, Clone)]
pub struct PostgresBidRepository {
    pool: MarketplacePgPool,
}

impl PostgresBidRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MarketplacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BidRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BidRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(|_| BidRepositoryError::Timeout)?;
            f(&mut connection)
        })
        .await
        .map_err(BidRepositoryError::persistence)?
    }
}

#[async_trait]
impl BidRepository for PostgresBidRepository {
    async fn store(&self, bid: &Bid) -> BidRepositoryResult<()> {
        let bid_id = bid.id();
        let new_row = bid_to_new_row(bid)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(bids::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BidRepositoryError::DuplicateBid(bid_id)
                    }
                    _ => BidRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BidId) -> BidRepositoryResult<Option<Bid>> {
        self.run_blocking(move |connection| {
            let row = bids::table
                .filter(bids::id.eq(id.into_inner()))
                .select(BidRow::as_select())
                .first::<BidRow>(connection)
                .optional()
                .map_err(BidRepositoryError::persistence)?;
            row.map(row_to_bid).transpose()
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> BidRepositoryResult<Vec<Bid>> {
        self.run_blocking(move |connection| {
            let rows = bids::table
                .filter(bids::task_id.eq(task_id.into_inner()))
                .order((bids::created_at.asc(), bids::id.asc()))
                .select(BidRow::as_select())
                .load::<BidRow>(connection)
                .map_err(BidRepositoryError::persistence)?;
            rows.into_iter().map(row_to_bid).collect()
        })
        .await
    }

    async fn list_for_bidder(&self, bidder_id: UserId) -> BidRepositoryResult<Vec<Bid>> {
        self.run_blocking(move |connection| {
            let rows = bids::table
                .filter(bids::bidder_id.eq(bidder_id.into_inner()))
                .select(BidRow::as_select())
                .load::<BidRow>(connection)
                .map_err(BidRepositoryError::persistence)?;
            rows.into_iter().map(row_to_bid).collect()
        })
        .await
    }

    async fn update_many(&self, bids_to_update: &[Bid]) -> BidRepositoryResult<()> {
        let rows: Vec<_> = bids_to_update
            .iter()
            .map(bid_to_new_row)
            .collect::<Result<_, _>>()?;

        self.run_blocking(move |connection| {
            // One transaction so the rejection cascade is all-or-nothing.
            connection
                .transaction::<_, BidRepositoryError, _>(|txn| {
                    for row in &rows {
                        let updated = diesel::update(
                            bids::table.filter(bids::id.eq(row.id)),
                        )
                        .set((
                            bids::status.eq(row.status.clone()),
                            bids::updated_at.eq(row.updated_at),
                        ))
                        .execute(txn)
                        .map_err(BidRepositoryError::persistence)?;
                        if updated == 0 {
                            return Err(BidRepositoryError::NotFound(BidId::from_uuid(row.id)));
                        }
                    }
                    Ok(())
                })
        })
        .await
    }
}
