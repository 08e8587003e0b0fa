use super::DateTime;
use tender_core::models::{
    AuctionData, AuctionRecord, AuctionStatus, CategoryId, JobDetails, OfferRecord, OfferTerms,
    Price,
};

fn decode<T, E>(value: Result<T, E>) -> Result<T, sqlx::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    value.map_err(|source| sqlx::Error::Decode(source.into()))
}

/// One row of the `auction` table.
#[derive(sqlx::FromRow)]
pub(crate) struct AuctionRow {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub categories: sqlx::types::Json<Vec<CategoryId>>,
    pub delivery_days: i64,
    pub start_at: DateTime,
    pub end_at: DateTime,
    pub status: String,
    pub winner_id: Option<String>,
    pub ending_soon_at: Option<DateTime>,
    pub created_at: DateTime,
}

impl TryFrom<AuctionRow> for AuctionRecord {
    type Error = sqlx::Error;

    fn try_from(row: AuctionRow) -> Result<Self, Self::Error> {
        Ok(AuctionRecord {
            id: decode(row.id.parse())?,
            owner: decode(row.owner_id.parse())?,
            data: AuctionData {
                details: JobDetails {
                    title: row.title,
                    description: row.description,
                    categories: row.categories.0,
                },
                delivery_days: row.delivery_days,
                start_at: row.start_at.into(),
                end_at: row.end_at.into(),
            },
            status: decode(row.status.parse())?,
            winner: row
                .winner_id
                .map(|winner| decode(winner.parse()))
                .transpose()?,
            ending_soon_at: row.ending_soon_at.map(Into::into),
            created_at: row.created_at.into(),
        })
    }
}

/// One row of the `offer` table.
#[derive(sqlx::FromRow)]
pub(crate) struct OfferRow {
    pub id: String,
    pub auction_id: String,
    pub seller_id: String,
    pub delivery_days: i64,
    pub price_minor: i64,
    pub submitted_at: DateTime,
}

impl TryFrom<OfferRow> for OfferRecord {
    type Error = sqlx::Error;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        Ok(OfferRecord {
            id: decode(row.id.parse())?,
            auction_id: decode(row.auction_id.parse())?,
            seller: decode(row.seller_id.parse())?,
            terms: OfferTerms {
                delivery_days: row.delivery_days,
                price: decode(Price::from_minor(row.price_minor))?,
            },
            submitted_at: row.submitted_at.into(),
        })
    }
}
