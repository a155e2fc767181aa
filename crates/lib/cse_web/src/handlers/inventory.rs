//! Inventory request handlers.
//!
//! The management, add, edit and delete routes sit behind the staff gate;
//! the classification grid, detail page and JSON listing are public.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use cse_core::models::{Classification, Vehicle};
use cse_core::store::StoreError;
use cse_core::validation::{
    ClassificationForm, FieldError, InventoryForm, Validated, VehicleUpdateForm, validate,
};
use tracing::{info, warn};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::{Form, Path};
use crate::handlers::{Page, failure_notice, failure_status, render};
use crate::middleware::session::Session;
use crate::services::flash;
use crate::views;

const MANAGEMENT_PATH: &str = "/inventory/";

fn vehicle_missing(inv_id: i32) -> AppError {
    AppError::NotFound(format!("vehicle {inv_id}"))
}

/// `GET /inventory/`
pub async fn management(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> AppResult<Response> {
    let classifications = state.store.list_classifications().await?;
    let page = Page::new(
        "Vehicle Management",
        views::inventory::management(&classifications),
    );
    Ok(render(&state, &session, jar, page).await)
}

fn classification_page(form: &ClassificationForm, errors: &[FieldError]) -> Page {
    Page::new(
        "Add New Classification",
        views::inventory::add_classification(form, errors),
    )
}

/// `GET /inventory/add-classification`
pub async fn classification_view(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Response {
    let page = classification_page(&ClassificationForm::default(), &[]);
    render(&state, &session, jar, page).await
}

/// `POST /inventory/add-classification`
pub async fn add_classification(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<ClassificationForm>,
) -> Response {
    const FAILED: &str = "Sorry, adding the classification failed.";

    let form = match validate(form) {
        Validated::Proceed(form) => form,
        Validated::Redisplay { errors, echoed } => {
            let page = classification_page(&echoed, &errors).status(StatusCode::BAD_REQUEST);
            return render(&state, &session, jar, page).await;
        }
    };

    let page = match state
        .store
        .create_classification(&form.classification_name)
        .await
    {
        Ok(0) => classification_page(&form, &[])
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .notice(FAILED),
        Ok(_) => {
            info!(name = %form.classification_name, "classification added");
            let message = format!(
                "The {} classification was successfully added.",
                form.classification_name
            );
            return flash::redirect(jar, MANAGEMENT_PATH, &message);
        }
        Err(StoreError::Conflict(_)) => {
            let errors = [FieldError::new(
                "classification_name",
                "That classification already exists.",
            )];
            classification_page(&form, &errors).status(StatusCode::BAD_REQUEST)
        }
        Err(e) => classification_page(&form, &[])
            .status(failure_status(&e))
            .notice(failure_notice("add classification", &e, FAILED)),
    };
    render(&state, &session, jar, page).await
}

fn add_vehicle_page(
    classifications: &[Classification],
    form: &InventoryForm,
    errors: &[FieldError],
) -> Page {
    Page::new(
        "Add New Vehicle",
        views::inventory::add_inventory(classifications, form, errors),
    )
}

/// `GET /inventory/add-inventory`
pub async fn vehicle_view(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> AppResult<Response> {
    let classifications = state.store.list_classifications().await?;
    let page = add_vehicle_page(&classifications, &InventoryForm::default(), &[]);
    Ok(render(&state, &session, jar, page).await)
}

/// Classifications for a re-rendered form. A failed load leaves the select
/// empty rather than replacing the form with an error page.
async fn select_options(state: &AppState) -> Vec<Classification> {
    state.store.list_classifications().await.unwrap_or_else(|e| {
        warn!(error = %e, "classification list unavailable");
        Vec::new()
    })
}

/// `POST /inventory/add-inventory`
pub async fn add_vehicle(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<InventoryForm>,
) -> Response {
    const FAILED: &str = "Sorry, adding the vehicle failed.";

    let form = match validate(form) {
        Validated::Proceed(form) => form,
        Validated::Redisplay { errors, echoed } => {
            let classifications = select_options(&state).await;
            let page = add_vehicle_page(&classifications, &echoed, &errors)
                .status(StatusCode::BAD_REQUEST);
            return render(&state, &session, jar, page).await;
        }
    };

    let written = state.store.add_vehicle(&form.to_vehicle()).await;
    let classifications = select_options(&state).await;
    let page = match written {
        Ok(0) => add_vehicle_page(&classifications, &form, &[])
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .notice(FAILED),
        Ok(_) => {
            info!(make = %form.inv_make, model = %form.inv_model, "vehicle added");
            let message = format!(
                "The {} {} was successfully added.",
                form.inv_make, form.inv_model
            );
            return flash::redirect(jar, MANAGEMENT_PATH, &message);
        }
        Err(e) => add_vehicle_page(&classifications, &form, &[])
            .status(failure_status(&e))
            .notice(failure_notice("add vehicle", &e, FAILED)),
    };
    render(&state, &session, jar, page).await
}

fn edit_page(
    classifications: &[Classification],
    inv_id: &str,
    form: &InventoryForm,
    errors: &[FieldError],
) -> Page {
    Page::new(
        format!("Edit {} {}", form.inv_make, form.inv_model),
        views::inventory::edit_inventory(classifications, inv_id, form, errors),
    )
}

/// `GET /inventory/edit/{inv_id}`
pub async fn edit_view(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(inv_id): Path<i32>,
) -> AppResult<Response> {
    let vehicle = state
        .store
        .vehicle_by_id(inv_id)
        .await?
        .ok_or_else(|| vehicle_missing(inv_id))?;
    let classifications = state.store.list_classifications().await?;
    let page = edit_page(
        &classifications,
        &inv_id.to_string(),
        &InventoryForm::from(&vehicle),
        &[],
    );
    Ok(render(&state, &session, jar, page).await)
}

/// `POST /inventory/update`
pub async fn update_vehicle(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<VehicleUpdateForm>,
) -> Response {
    const FAILED: &str = "Sorry, the update failed.";

    let form = match validate(form) {
        Validated::Proceed(form) => form,
        Validated::Redisplay { errors, echoed } => {
            let classifications = select_options(&state).await;
            let page = edit_page(&classifications, &echoed.inv_id, &echoed.vehicle, &errors)
                .status(StatusCode::BAD_REQUEST);
            return render(&state, &session, jar, page).await;
        }
    };

    let written = match form.inv_id() {
        Some(inv_id) => {
            state
                .store
                .update_vehicle(inv_id, &form.vehicle.to_vehicle())
                .await
        }
        None => Ok(0),
    };
    let classifications = select_options(&state).await;
    let page = match written {
        Ok(0) => edit_page(&classifications, &form.inv_id, &form.vehicle, &[])
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .notice(FAILED),
        Ok(_) => {
            info!(inv_id = %form.inv_id, "vehicle updated");
            let message = format!(
                "The {} {} was successfully updated.",
                form.vehicle.inv_make, form.vehicle.inv_model
            );
            return flash::redirect(jar, MANAGEMENT_PATH, &message);
        }
        Err(e) => edit_page(&classifications, &form.inv_id, &form.vehicle, &[])
            .status(failure_status(&e))
            .notice(failure_notice("update vehicle", &e, FAILED)),
    };
    render(&state, &session, jar, page).await
}

/// `GET /inventory/delete/{inv_id}`
pub async fn delete_view(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(inv_id): Path<i32>,
) -> AppResult<Response> {
    let vehicle = state
        .store
        .vehicle_by_id(inv_id)
        .await?
        .ok_or_else(|| vehicle_missing(inv_id))?;
    let page = Page::new(
        format!("Delete {}", vehicle.name()),
        views::inventory::delete_confirmation(&vehicle),
    );
    Ok(render(&state, &session, jar, page).await)
}

/// `POST /inventory/delete/{inv_id}`: zero rows deleted is reported as a
/// failed delete, never an error page.
pub async fn delete_vehicle(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(inv_id): Path<i32>,
) -> Response {
    const FAILED: &str = "Sorry, the delete failed.";

    let message = match state.store.delete_vehicle(inv_id).await {
        Ok(0) => {
            warn!(inv_id, "delete matched no vehicle");
            FAILED.to_string()
        }
        Ok(_) => {
            info!(inv_id, "vehicle deleted");
            "The deletion was successful.".to_string()
        }
        Err(e) => failure_notice("delete vehicle", &e, FAILED),
    };
    flash::redirect(jar, MANAGEMENT_PATH, &message)
}

/// `GET /inventory/getInventory/{classification_id}`: vehicles as JSON for the
/// management page.
pub async fn inventory_json(
    State(state): State<AppState>,
    Path(classification_id): Path<i32>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state
        .store
        .vehicles_by_classification(classification_id)
        .await?;
    Ok(Json(vehicles))
}

/// `GET /inventory/type/{classification_id}`
pub async fn by_classification(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(classification_id): Path<i32>,
) -> AppResult<Response> {
    let classification = state
        .store
        .list_classifications()
        .await?
        .into_iter()
        .find(|c| c.id == classification_id)
        .ok_or_else(|| AppError::NotFound(format!("classification {classification_id}")))?;
    let vehicles = state
        .store
        .vehicles_by_classification(classification_id)
        .await?;
    let page = Page::new(
        format!("{} vehicles", classification.name),
        views::inventory::classification_grid(&vehicles),
    );
    Ok(render(&state, &session, jar, page).await)
}

/// `GET /inventory/detail/{inv_id}`
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(inv_id): Path<i32>,
) -> AppResult<Response> {
    let vehicle = state
        .store
        .vehicle_by_id(inv_id)
        .await?
        .ok_or_else(|| vehicle_missing(inv_id))?;
    let page = Page::new(
        format!("{} {}", vehicle.year, vehicle.name()),
        views::inventory::detail(&vehicle),
    );
    Ok(render(&state, &session, jar, page).await)
}

/// `GET /inventory/500`: deliberately fails to exercise the error page.
pub async fn trigger_error() -> AppResult<Response> {
    Err(AppError::Internal("intentional error raised by /inventory/500".into()))
}
