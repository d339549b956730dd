//! # Catalog Commands
//!
//! Clients, operators, the material price board and yard settings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use yard_core::{Client, Material, MaterialCategory, Operator};
use yard_db::NewClient;

/// Yard-wide settings as shown on the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub unit_price_adjustment_permitted: bool,
}

/// Lists active clients, newest first.
pub async fn list_clients(db: &DbState) -> Result<Vec<Client>, ApiError> {
    debug!("list_clients command");
    Ok(db.inner().clients().list_active().await?)
}

/// Registers a client and returns it with its generated code.
pub async fn create_client(db: &DbState, client: NewClient) -> Result<Client, ApiError> {
    debug!(name = %client.name, "create_client command");
    Ok(db.inner().clients().create(&client).await?)
}

/// Lists active operators.
pub async fn list_operators(db: &DbState) -> Result<Vec<Operator>, ApiError> {
    debug!("list_operators command");
    Ok(db.inner().operators().list_active().await?)
}

/// Lists material categories in tab order.
pub async fn list_categories(db: &DbState) -> Result<Vec<MaterialCategory>, ApiError> {
    debug!("list_categories command");
    Ok(db.inner().materials().list_categories().await?)
}

/// Lists the materials of one category.
pub async fn list_materials(db: &DbState, category_id: i64) -> Result<Vec<Material>, ApiError> {
    debug!(category_id, "list_materials command");
    Ok(db.inner().materials().list_by_category(category_id).await?)
}

/// Gets yard-wide settings.
pub async fn get_settings(db: &DbState) -> Result<SettingsResponse, ApiError> {
    debug!("get_settings command");

    let permitted = db.inner().settings().unit_price_adjustment_permitted().await?;
    Ok(SettingsResponse {
        unit_price_adjustment_permitted: permitted,
    })
}

/// Turns unit price adjustment on or off for every terminal.
pub async fn set_unit_price_adjustment(
    db: &DbState,
    permitted: bool,
) -> Result<SettingsResponse, ApiError> {
    debug!(permitted, "set_unit_price_adjustment command");

    db.inner()
        .settings()
        .set_unit_price_adjustment_permitted(permitted)
        .await?;

    Ok(SettingsResponse {
        unit_price_adjustment_permitted: permitted,
    })
}

/// Gets the terminal configuration.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
