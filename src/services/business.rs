//! Business profile (single record)

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TryIntoModel};

use crate::entities::{business, prelude::*};
use crate::error::{AppError, AppResult, DbResultExt};
use crate::models::business::BusinessRequest;

async fn find_profile(db: &DatabaseConnection) -> AppResult<Option<business::Model>> {
    Business::find()
        .order_by_asc(business::Column::Id)
        .one(db)
        .await
        .context("failed to find business info")
}

pub async fn get_business(db: &DatabaseConnection) -> AppResult<business::Model> {
    find_profile(db)
        .await?
        .ok_or_else(|| AppError::not_found("business info not found"))
}

/// Create the profile on first write, overwrite it afterwards
pub async fn upsert_business(
    db: &DatabaseConnection,
    request: BusinessRequest,
) -> AppResult<business::Model> {
    if request.business_name.trim().is_empty() {
        return Err(AppError::validation("business name cannot be empty"));
    }

    let now = Utc::now().fixed_offset();

    let mut active: business::ActiveModel = match find_profile(db).await? {
        Some(existing) => existing.into(),
        None => business::ActiveModel {
            created_at: Set(now),
            ..Default::default()
        },
    };
    active.business_name = Set(request.business_name);
    active.address = Set(request.address);
    active.phone_number = Set(request.phone_number);
    active.email = Set(request.email);
    active.corporate_reason = Set(request.corporate_reason);
    active.updated_at = Set(now);

    let saved = active.save(db).await.context("failed to save business info")?;
    saved
        .try_into_model()
        .context("failed to read saved business info")
}
