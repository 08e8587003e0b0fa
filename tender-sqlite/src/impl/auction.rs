use crate::{
    Db,
    types::{AuctionRow, DateTime},
};
use sqlx::types::Json;
use tender_core::models::{AuctionData, AuctionId, AuctionRecord, AuctionStatus, UserId};
use tender_core::ports::AuctionRepository;
use time::{Duration, OffsetDateTime};

const AUCTION_COLUMNS: &str = "id, owner_id, title, description, categories, delivery_days, \
                               start_at, end_at, status, winner_id, ending_soon_at, created_at";

fn rows_to_records(rows: Vec<AuctionRow>) -> Result<Vec<AuctionRecord>, sqlx::Error> {
    rows.into_iter().map(TryInto::try_into).collect()
}

impl AuctionRepository for Db {
    async fn create_auction(
        &self,
        auction_id: AuctionId,
        owner: UserId,
        data: AuctionData,
        timestamp: OffsetDateTime,
    ) -> Result<AuctionRecord, Self::Error> {
        sqlx::query(
            r#"
            insert into
                auction (id, owner_id, title, description, categories, delivery_days,
                         start_at, end_at, status, winner_id, ending_soon_at, created_at)
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, null, null, $10)
            "#,
        )
        .bind(auction_id.to_string())
        .bind(owner.to_string())
        .bind(&data.details.title)
        .bind(&data.details.description)
        .bind(Json(&data.details.categories))
        .bind(data.delivery_days)
        .bind(DateTime::from(data.start_at))
        .bind(DateTime::from(data.end_at))
        .bind(AuctionStatus::Pending.as_str())
        .bind(DateTime::from(timestamp))
        .execute(&self.writer)
        .await?;

        Ok(AuctionRecord {
            id: auction_id,
            owner,
            data,
            status: AuctionStatus::Pending,
            winner: None,
            ending_soon_at: None,
            created_at: timestamp,
        })
    }

    async fn get_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<AuctionRecord>, Self::Error> {
        sqlx::query_as::<_, AuctionRow>(&format!(
            "select {AUCTION_COLUMNS} from auction where id = $1"
        ))
        .bind(auction_id.to_string())
        .fetch_optional(&self.reader)
        .await?
        .map(TryInto::try_into)
        .transpose()
    }

    async fn update_auction(
        &self,
        auction_id: AuctionId,
        data: AuctionData,
    ) -> Result<Option<AuctionRecord>, Self::Error> {
        sqlx::query_as::<_, AuctionRow>(&format!(
            r#"
            update
                auction
            set
                title = $2, description = $3, categories = $4,
                delivery_days = $5, start_at = $6, end_at = $7
            where
                id = $1 and status = $8
            returning
                {AUCTION_COLUMNS}
            "#
        ))
        .bind(auction_id.to_string())
        .bind(&data.details.title)
        .bind(&data.details.description)
        .bind(Json(&data.details.categories))
        .bind(data.delivery_days)
        .bind(DateTime::from(data.start_at))
        .bind(DateTime::from(data.end_at))
        .bind(AuctionStatus::Pending.as_str())
        .fetch_optional(&self.writer)
        .await?
        .map(TryInto::try_into)
        .transpose()
    }

    async fn delete_auction(&self, auction_id: AuctionId) -> Result<bool, Self::Error> {
        let id = auction_id.to_string();
        let mut tx = self.writer.begin().await?;

        // Children first: the cascade is explicit, and the foreign keys
        // would otherwise reject deleting the parent row.
        sqlx::query("delete from offer where auction_id = $1")
            .bind(&id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("delete from subscription where auction_id = $1")
            .bind(&id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("delete from auction where id = $1")
            .bind(&id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn list_by_status(
        &self,
        status: AuctionStatus,
    ) -> Result<Vec<AuctionRecord>, Self::Error> {
        let rows = sqlx::query_as::<_, AuctionRow>(&format!(
            "select {AUCTION_COLUMNS} from auction where status = $1 order by end_at, id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.reader)
        .await?;
        rows_to_records(rows)
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        status: Option<AuctionStatus>,
    ) -> Result<Vec<AuctionRecord>, Self::Error> {
        let rows = sqlx::query_as::<_, AuctionRow>(&format!(
            r#"
            select {AUCTION_COLUMNS} from auction
            where owner_id = $1 and ($2 is null or status = $2)
            order by end_at, id
            "#
        ))
        .bind(owner.to_string())
        .bind(status.map(|status| status.as_str()))
        .fetch_all(&self.reader)
        .await?;
        rows_to_records(rows)
    }

    async fn list_subscribed(&self, user: UserId) -> Result<Vec<AuctionRecord>, Self::Error> {
        let rows = sqlx::query_as::<_, AuctionRow>(
            r#"
            select auction.* from auction
            join subscription on subscription.auction_id = auction.id
            where subscription.user_id = $1
            order by auction.end_at, auction.id
            "#,
        )
        .bind(user.to_string())
        .fetch_all(&self.reader)
        .await?;
        rows_to_records(rows)
    }

    async fn open_due(&self, now: OffsetDateTime) -> Result<Vec<AuctionRecord>, Self::Error> {
        let rows = sqlx::query_as::<_, AuctionRow>(&format!(
            r#"
            select {AUCTION_COLUMNS} from auction
            where status = 'PENDING' and start_at <= $1
            order by start_at, id
            "#
        ))
        .bind(DateTime::from(now))
        .fetch_all(&self.reader)
        .await?;
        rows_to_records(rows)
    }

    async fn close_due(&self, now: OffsetDateTime) -> Result<Vec<AuctionRecord>, Self::Error> {
        let rows = sqlx::query_as::<_, AuctionRow>(&format!(
            r#"
            select {AUCTION_COLUMNS} from auction
            where status = 'OPEN' and end_at <= $1
            order by end_at, id
            "#
        ))
        .bind(DateTime::from(now))
        .fetch_all(&self.reader)
        .await?;
        rows_to_records(rows)
    }

    async fn ending_soon_due(
        &self,
        now: OffsetDateTime,
        window: Duration,
    ) -> Result<Vec<AuctionRecord>, Self::Error> {
        let rows = sqlx::query_as::<_, AuctionRow>(&format!(
            r#"
            select {AUCTION_COLUMNS} from auction
            where status = 'OPEN' and ending_soon_at is null and end_at > $1 and end_at <= $2
            order by end_at, id
            "#
        ))
        .bind(DateTime::from(now))
        .bind(DateTime::from(now + window))
        .fetch_all(&self.reader)
        .await?;
        rows_to_records(rows)
    }

    async fn advance_status(
        &self,
        auction_id: AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> Result<bool, Self::Error> {
        let advanced = sqlx::query("update auction set status = $3 where id = $1 and status = $2")
            .bind(auction_id.to_string())
            .bind(from.as_str())
            .bind(to.as_str())
            .execute(&self.writer)
            .await?
            .rows_affected();
        Ok(advanced > 0)
    }

    async fn mark_ending_soon(
        &self,
        auction_id: AuctionId,
        timestamp: OffsetDateTime,
    ) -> Result<bool, Self::Error> {
        let claimed = sqlx::query(
            r#"
            update auction set ending_soon_at = $2
            where id = $1 and status = 'OPEN' and ending_soon_at is null
            "#,
        )
        .bind(auction_id.to_string())
        .bind(DateTime::from(timestamp))
        .execute(&self.writer)
        .await?
        .rows_affected();
        Ok(claimed > 0)
    }

    async fn record_winner(
        &self,
        auction_id: AuctionId,
        winner: UserId,
    ) -> Result<bool, Self::Error> {
        let recorded = sqlx::query(
            r#"
            update auction set winner_id = $2
            where id = $1 and status = 'CLOSED' and winner_id is null
            "#,
        )
        .bind(auction_id.to_string())
        .bind(winner.to_string())
        .execute(&self.writer)
        .await?
        .rows_affected();
        Ok(recorded > 0)
    }
}
