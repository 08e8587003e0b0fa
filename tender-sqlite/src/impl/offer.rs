use crate::{
    Db,
    types::{DateTime, OfferRow},
};
use tender_core::models::{AuctionId, OfferId, OfferRecord, OfferTerms, UserId};
use tender_core::ports::OfferRepository;
use time::OffsetDateTime;

const OFFER_COLUMNS: &str = "id, auction_id, seller_id, delivery_days, price_minor, submitted_at";

impl OfferRepository for Db {
    async fn upsert_offer(
        &self,
        offer_id: OfferId,
        auction_id: AuctionId,
        seller: UserId,
        terms: OfferTerms,
        timestamp: OffsetDateTime,
    ) -> Result<Option<OfferRecord>, Self::Error> {
        // One statement does it all: the select-guard gates on the parent
        // being open, the conflict clause turns a re-submission into an
        // in-place overwrite, and the single writer connection linearizes
        // concurrent submissions for the same (auction, seller) pair.
        sqlx::query_as::<_, OfferRow>(&format!(
            r#"
            insert into
                offer (id, auction_id, seller_id, delivery_days, price_minor, submitted_at)
            select
                $1, $2, $3, $4, $5, $6
            where exists
                (select 1 from auction where id = $2 and status = 'OPEN')
            on conflict (auction_id, seller_id) do update set
                delivery_days = excluded.delivery_days,
                price_minor = excluded.price_minor,
                submitted_at = excluded.submitted_at
            returning
                {OFFER_COLUMNS}
            "#
        ))
        .bind(offer_id.to_string())
        .bind(auction_id.to_string())
        .bind(seller.to_string())
        .bind(terms.delivery_days)
        .bind(terms.price.minor())
        .bind(DateTime::from(timestamp))
        .fetch_optional(&self.writer)
        .await?
        .map(TryInto::try_into)
        .transpose()
    }

    async fn get_offer(&self, offer_id: OfferId) -> Result<Option<OfferRecord>, Self::Error> {
        sqlx::query_as::<_, OfferRow>(&format!(
            "select {OFFER_COLUMNS} from offer where id = $1"
        ))
        .bind(offer_id.to_string())
        .fetch_optional(&self.reader)
        .await?
        .map(TryInto::try_into)
        .transpose()
    }

    async fn find_offer(
        &self,
        auction_id: AuctionId,
        seller: UserId,
    ) -> Result<Option<OfferRecord>, Self::Error> {
        sqlx::query_as::<_, OfferRow>(&format!(
            "select {OFFER_COLUMNS} from offer where auction_id = $1 and seller_id = $2"
        ))
        .bind(auction_id.to_string())
        .bind(seller.to_string())
        .fetch_optional(&self.reader)
        .await?
        .map(TryInto::try_into)
        .transpose()
    }

    async fn delete_offer(&self, offer_id: OfferId) -> Result<bool, Self::Error> {
        let deleted = sqlx::query("delete from offer where id = $1")
            .bind(offer_id.to_string())
            .execute(&self.writer)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn list_offers(&self, auction_id: AuctionId) -> Result<Vec<OfferRecord>, Self::Error> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            "select {OFFER_COLUMNS} from offer where auction_id = $1 order by submitted_at, id"
        ))
        .bind(auction_id.to_string())
        .fetch_all(&self.reader)
        .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }
}
