use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Item as returned by the API.
#[derive(Serialize, ToSchema)]
pub struct ItemDoc {
    #[serde(rename = "itemId")]
    pub item_id: i32,
    pub name: String,
    pub status: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPageDoc {
    pub content: Vec<ItemDoc>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub first: bool,
    pub last: bool,
    pub number_of_elements: u64,
    pub empty: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::items::list,
        crate::routes::items::create,
        crate::routes::items::get,
        crate::routes::items::update,
        crate::routes::items::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            ItemPageDoc,
            crate::routes::items::ItemInput,
            crate::errors::ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "items", description = "To-do item CRUD")
    )
)]
pub struct ApiDoc;
