use crate::models::admin::{dish_id_or_name, normalize_dish_id, DishRecord};
use crate::traits::{require_max_len, require_non_blank, Validate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    pub admin_id: String,
    pub password: String,
}

impl Validate for AdminLoginRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("adminId", &self.admin_id)?;
        require_non_blank("password", &self.password)
    }
}

#[derive(Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GeneralResponse {
    pub status: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishInput {
    /// Derived from `name` when omitted.
    pub dish_id: Option<String>,
    pub name: String,
    pub price: f64,
    pub veg: bool,
    pub available: bool,
}

impl DishInput {
    pub fn normalized_id(&self) -> String {
        match self.dish_id.as_deref() {
            Some(id) if !id.trim().is_empty() => normalize_dish_id(id),
            _ => normalize_dish_id(&self.name),
        }
    }
}

impl Validate for DishInput {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("name", &self.name)?;
        require_max_len("name", &self.name, 120)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number: {}", self.name));
        }
        if self.normalized_id().is_empty() {
            return Err(format!(
                "name has no letters or digits to build a dish id from: {}",
                self.name
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpsertDishesRequest {
    pub items: Vec<DishInput>,
}

impl Validate for UpsertDishesRequest {
    fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("items must not be empty".to_string());
        }
        self.items.validate()?;
        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            let id = item.normalized_id();
            if !seen.insert(id.clone()) {
                return Err(format!("duplicate dish id in request: {id}"));
            }
        }
        Ok(())
    }
}

#[derive(Serialize, ToSchema)]
pub struct UpsertDishesResponse {
    pub status: String,
    pub data: Vec<DishRecord>,
    pub error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDishRequest {
    #[serde(default)]
    pub dish_name: Option<String>,
    #[serde(default)]
    pub dish_id: Option<String>,
}

impl DeleteDishRequest {
    pub fn normalized_id(&self) -> Option<String> {
        dish_id_or_name(self.dish_id.as_deref(), self.dish_name.as_deref())
    }
}

impl Validate for DeleteDishRequest {
    fn validate(&self) -> Result<(), String> {
        match self.normalized_id() {
            Some(_) => Ok(()),
            None => Err("dishId or dishName is required".to_string()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DishListResponse {
    pub status: String,
    pub items: Vec<DishRecord>,
    pub error: Option<String>,
}
