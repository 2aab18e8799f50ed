use mongodb::{
    Database, IndexModel,
    bson::doc,
    options::IndexOptions,
};

use crate::error::Result;

pub async fn ensure_indexes(db: &Database) -> Result<()> {
    // crypto_prices: one row per symbol
    {
        let col = db.collection::<mongodb::bson::Document>("crypto_prices");
        let model = IndexModel::builder()
            .keys(doc! { "symbol": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // stock_prices: one row per symbol
    {
        let col = db.collection::<mongodb::bson::Document>("stock_prices");
        let model = IndexModel::builder()
            .keys(doc! { "symbol": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // forex_rates: one row per ordered currency pair
    {
        let col = db.collection::<mongodb::bson::Document>("forex_rates");
        let model = IndexModel::builder()
            .keys(doc! { "base_currency": 1, "target_currency": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // alerts: helpful for the evaluation scan
    {
        let col = db.collection::<mongodb::bson::Document>("alerts");
        let model = IndexModel::builder()
            .keys(doc! { "is_active": 1, "is_triggered": 1 })
            .build();

        let _ = col.create_index(model, None).await;
    }

    Ok(())
}
