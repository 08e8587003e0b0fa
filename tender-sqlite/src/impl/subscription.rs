use crate::Db;
use tender_core::models::{AuctionId, SubscriptionId, UserId};
use tender_core::ports::SubscriptionRepository;

impl SubscriptionRepository for Db {
    async fn insert_subscription(
        &self,
        subscription_id: SubscriptionId,
        auction_id: AuctionId,
        user: UserId,
    ) -> Result<bool, Self::Error> {
        // `do nothing` keeps duplicate detection race-free: zero affected
        // rows means the pair already existed.
        let inserted = sqlx::query(
            r#"
            insert into subscription (id, auction_id, user_id)
            values ($1, $2, $3)
            on conflict (auction_id, user_id) do nothing
            "#,
        )
        .bind(subscription_id.to_string())
        .bind(auction_id.to_string())
        .bind(user.to_string())
        .execute(&self.writer)
        .await?
        .rows_affected();
        Ok(inserted > 0)
    }

    async fn remove_subscription(
        &self,
        auction_id: AuctionId,
        user: UserId,
    ) -> Result<bool, Self::Error> {
        let removed = sqlx::query("delete from subscription where auction_id = $1 and user_id = $2")
            .bind(auction_id.to_string())
            .bind(user.to_string())
            .execute(&self.writer)
            .await?
            .rows_affected();
        Ok(removed > 0)
    }

    async fn is_subscribed(&self, auction_id: AuctionId, user: UserId) -> Result<bool, Self::Error> {
        sqlx::query_scalar::<_, bool>(
            "select exists (select 1 from subscription where auction_id = $1 and user_id = $2)",
        )
        .bind(auction_id.to_string())
        .bind(user.to_string())
        .fetch_one(&self.reader)
        .await
    }

    async fn list_subscribers(&self, auction_id: AuctionId) -> Result<Vec<UserId>, Self::Error> {
        let users = sqlx::query_scalar::<_, String>(
            "select user_id from subscription where auction_id = $1 order by user_id",
        )
        .bind(auction_id.to_string())
        .fetch_all(&self.reader)
        .await?;

        users
            .into_iter()
            .map(|user| {
                user.parse()
                    .map_err(|source: uuid::Error| sqlx::Error::Decode(source.into()))
            })
            .collect()
    }
}
