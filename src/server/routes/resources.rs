//! Generic CRUD endpoints for the shop's collections

use crate::auth::rbac::{AccessRequirement, Permission, Role};
use crate::core::models::{
    Customer, Employee, Export, MenuItem, Product, Resource, StockItem, Supplier, Voucher,
};
use crate::server::middleware::RequireAccess;
use crate::server::routes::{ApiResponse, ListParams, PaginatedResponse};
use crate::server::state::AppState;
use crate::storage::{ListQuery, Repository};
use crate::utils::error::ShopError;
use actix_web::{HttpResponse, Result as ActixResult, Scope, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::rbac::AccessRequirement::{Manager, Permission as Perm};

/// Configure the CRUD scopes with their read/write rules
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        crud_routes::<Product>(web::scope("/products")).wrap(RequireAccess::read_write(
            Perm(Permission::ViewProducts),
            Perm(Permission::ManageProducts),
        )),
    )
    .service(
        crud_routes::<MenuItem>(web::scope("/menu-items")).wrap(RequireAccess::read_write(
            Perm(Permission::ViewProducts),
            Perm(Permission::ManageMenu),
        )),
    )
    .service(
        crud_routes::<Supplier>(web::scope("/suppliers")).wrap(RequireAccess::read_write(
            Perm(Permission::ViewSuppliers),
            Perm(Permission::ManageSuppliers),
        )),
    )
    .service(
        crud_routes::<StockItem>(
            web::scope("/stock").route("/low", web::get().to(low_stock)),
        )
        .wrap(RequireAccess::read_write(
            Manager,
            Perm(Permission::ManageInventory),
        )),
    )
    .service(
        crud_routes::<Employee>(web::scope("/employees")).wrap(RequireAccess::read_write(
            Perm(Permission::ViewEmployeeRecords),
            Perm(Permission::ManageEmployees),
        )),
    )
    .service(
        crud_routes::<Customer>(web::scope("/customers")).wrap(RequireAccess::read_write(
            Perm(Permission::ViewCustomers),
            Perm(Permission::ManageCustomers),
        )),
    )
    .service(
        crud_routes::<Export>(web::scope("/exports")).wrap(RequireAccess::read_write(
            AccessRequirement::Role(Role::WarehouseManager),
            Perm(Permission::ManageExports),
        )),
    )
    .service(
        crud_routes::<Voucher>(web::scope("/vouchers")).wrap(RequireAccess::read_write(
            Perm(Permission::ViewProducts),
            Perm(Permission::ManageVouchers),
        )),
    );
}

/// List and fetch
pub fn read_routes<T: Resource>(scope: Scope) -> Scope {
    scope
        .route("", web::get().to(list::<T>))
        .route("/{id}", web::get().to(get::<T>))
}

/// Create, replace and delete
pub fn write_routes<T: Resource>(scope: Scope) -> Scope {
    scope
        .route("", web::post().to(create::<T>))
        .route("/{id}", web::put().to(update::<T>))
        .route("/{id}", web::delete().to(delete::<T>))
}

pub fn crud_routes<T: Resource>(scope: Scope) -> Scope {
    write_routes::<T>(read_routes::<T>(scope))
}

fn repository<T: Resource>(state: &AppState) -> Repository<T> {
    Repository::new(state.store.clone())
}

pub(crate) fn list_query(state: &AppState, params: &ListParams) -> Result<ListQuery, ShopError> {
    params
        .to_query(state.config.storage())
        .map_err(ShopError::bad_request)
}

pub async fn list<T: Resource>(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    let query = list_query(&state, &params)?;
    let page = repository::<T>(&state).list(&query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PaginatedResponse::from(page))))
}

pub async fn get<T: Resource>(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let record = repository::<T>(&state).get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

pub async fn create<T: Resource>(
    state: web::Data<AppState>,
    body: web::Json<T>,
) -> ActixResult<HttpResponse> {
    let record = repository::<T>(&state).create(body.into_inner()).await?;
    info!("Created {} {}", T::COLLECTION, record.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(record)))
}

pub async fn update<T: Resource>(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<T>,
) -> ActixResult<HttpResponse> {
    let record = repository::<T>(&state)
        .update(path.into_inner(), body.into_inner())
        .await?;
    info!("Updated {} {}", T::COLLECTION, record.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

pub async fn delete<T: Resource>(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    repository::<T>(&state).delete(id).await?;
    info!("Deleted {} {}", T::COLLECTION, id);

    Ok(HttpResponse::NoContent().finish())
}

/// Stock items at or below their reorder level
pub async fn low_stock(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let repo = repository::<StockItem>(&state);
    let total = repo.count().await?;

    let page = repo
        .list(&ListQuery::new(1, total.max(1) as u32))
        .await?;
    let low: Vec<_> = page
        .items
        .into_iter()
        .filter(|item| item.data.needs_reorder())
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(low)))
}
