//! Inventory views.

use cse_core::models::{Classification, Vehicle};
use cse_core::validation::{ClassificationForm, FieldError, InventoryForm};

use super::{classification_select, error_list, escape, group_digits};

pub fn management(classifications: &[Classification]) -> String {
    format!(
        r#"<ul class="management-links">
<li><a href="/inventory/add-classification" title="Add a new classification">Add New Classification</a></li>
<li><a href="/inventory/add-inventory" title="Add a new vehicle">Add New Vehicle</a></li>
</ul>
<h2>Manage Inventory</h2>
<p>Select a classification from the list to see the items belonging to the classification.</p>
{select}
<table id="inventoryDisplay"></table>
<noscript>JavaScript must be enabled to use this page.</noscript>
<script src="/js/inventory.js"></script>"#,
        select = classification_select(classifications, None),
    )
}

pub fn add_classification(form: &ClassificationForm, errors: &[FieldError]) -> String {
    format!(
        r#"{errors}
<p>Field is required. Name must be letters and numbers only, no spaces or special characters.</p>
<form id="addClassificationForm" action="/inventory/add-classification" method="post">
<label>Classification Name <input type="text" name="classification_name" required pattern="[A-Za-z0-9]+" value="{name}"></label>
<button type="submit">Add Classification</button>
</form>"#,
        errors = error_list(errors),
        name = escape(&form.classification_name),
    )
}

fn vehicle_fields(classifications: &[Classification], form: &InventoryForm) -> String {
    format!(
        r#"<label>Classification {select}</label>
<label>Make <input type="text" name="inv_make" required minlength="3" value="{make}"></label>
<label>Model <input type="text" name="inv_model" required minlength="3" value="{model}"></label>
<label>Description <textarea name="inv_description" required>{description}</textarea></label>
<label>Image Path <input type="text" name="inv_image" required value="{image}"></label>
<label>Thumbnail Path <input type="text" name="inv_thumbnail" required value="{thumbnail}"></label>
<label>Price <input type="number" name="inv_price" required value="{price}"></label>
<label>Year <input type="number" name="inv_year" required minlength="4" maxlength="4" value="{year}"></label>
<label>Miles <input type="number" name="inv_miles" required value="{miles}"></label>
<label>Color <input type="text" name="inv_color" required value="{color}"></label>"#,
        select = classification_select(classifications, form.selected_classification()),
        make = escape(&form.inv_make),
        model = escape(&form.inv_model),
        description = escape(&form.inv_description),
        image = escape(&form.inv_image),
        thumbnail = escape(&form.inv_thumbnail),
        price = escape(&form.inv_price),
        year = escape(&form.inv_year),
        miles = escape(&form.inv_miles),
        color = escape(&form.inv_color),
    )
}

pub fn add_inventory(
    classifications: &[Classification],
    form: &InventoryForm,
    errors: &[FieldError],
) -> String {
    format!(
        r#"{errors}
<p>All fields are required.</p>
<form id="addInventoryForm" action="/inventory/add-inventory" method="post">
{fields}
<button type="submit">Add Vehicle</button>
</form>"#,
        errors = error_list(errors),
        fields = vehicle_fields(classifications, form),
    )
}

pub fn edit_inventory(
    classifications: &[Classification],
    inv_id: &str,
    form: &InventoryForm,
    errors: &[FieldError],
) -> String {
    format!(
        r#"{errors}
<form id="updateForm" action="/inventory/update" method="post">
{fields}
<input type="hidden" name="inv_id" value="{inv_id}">
<button type="submit" class="submit-button" disabled>Update Vehicle</button>
</form>
<script src="/js/inventory.js"></script>"#,
        errors = error_list(errors),
        fields = vehicle_fields(classifications, form),
        inv_id = escape(inv_id),
    )
}

pub fn delete_confirmation(vehicle: &Vehicle) -> String {
    format!(
        r#"<p>Confirm Deletion - The delete is permanent.</p>
<form id="deleteForm" action="/inventory/delete/{id}" method="post">
<label>Make <input type="text" name="inv_make" readonly value="{make}"></label>
<label>Model <input type="text" name="inv_model" readonly value="{model}"></label>
<label>Year <input type="text" name="inv_year" readonly value="{year}"></label>
<label>Price <input type="text" name="inv_price" readonly value="{price}"></label>
<input type="hidden" name="inv_id" value="{id}">
<button type="submit">Delete Vehicle</button>
</form>"#,
        id = vehicle.id,
        make = escape(&vehicle.make),
        model = escape(&vehicle.model),
        year = escape(&vehicle.year),
        price = vehicle.price,
    )
}

/// Thumbnail grid shared by the classification and search pages.
pub fn vehicle_grid(vehicles: &[Vehicle]) -> String {
    let mut grid = String::from(r#"<ul id="inv-display">"#);
    for v in vehicles {
        let name = escape(&v.name());
        grid.push_str(&format!(
            r#"<li><a href="/inventory/detail/{id}" title="View {name} details"><img src="{thumb}" alt="Image of {name} on CSE Motors"></a>
<div class="namePrice"><hr><h2><a href="/inventory/detail/{id}" title="View {name} details">{name}</a></h2><span>${price}</span></div></li>"#,
            id = v.id,
            thumb = escape(&v.thumbnail),
            price = group_digits(v.price),
        ));
    }
    grid.push_str("</ul>");
    grid
}

pub fn classification_grid(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return r#"<p class="notice">Sorry, no matching vehicles could be found.</p>"#.to_string();
    }
    vehicle_grid(vehicles)
}

pub fn detail(v: &Vehicle) -> String {
    format!(
        r#"<div id="inv-detail-wrapper">
<div class="image-container"><img src="{image}" alt="Image of a {name}"></div>
<div class="content-container">
<h2>{name} Details</h2>
<ul>
<li><span class="detail-label">Price:</span> ${price}</li>
<li><span class="detail-label">Mileage:</span> {miles} miles</li>
<li><span class="detail-label">Year:</span> {year}</li>
<li><span class="detail-label">Make:</span> {make}</li>
<li><span class="detail-label">Model:</span> {model}</li>
<li><span class="detail-label">Description:</span> {description}</li>
<li><span class="detail-label">Color:</span> {color}</li>
</ul>
</div>
</div>"#,
        image = escape(&v.image),
        name = escape(&v.name()),
        price = group_digits(v.price),
        miles = group_digits(i64::from(v.miles)),
        year = escape(&v.year),
        make = escape(&v.make),
        model = escape(&v.model),
        description = escape(&v.description),
        color = escape(&v.color),
    )
}

pub fn search_results(term: &str, vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return format!(
            r#"<p class="notice">Sorry, no vehicles matched "{}".</p>"#,
            escape(term)
        );
    }
    vehicle_grid(vehicles)
}
