//! Submitted forms and their rule sets.
//!
//! Field names match the HTML input names so a rejected form can be echoed
//! straight back into the view. Every field defaults to empty when missing
//! from the request body, which turns absent inputs into rule failures
//! rather than extractor rejections.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::rules::{
    four_digit_year, letters, letters_and_digits, price, strong_password, whole_number,
};
use super::{FormData, Validated, check};
use crate::models::{AccountUpdate, NewVehicle};
use crate::store::{AccountStore, StoreResult};

pub const EMAIL_EXISTS: &str = "Email exists. Please log in or use different email";
pub const PASSWORD_RULE: &str = "Password does not meet requirements.";

fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// `POST /account/login`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub account_password: String,
}

impl FormData for LoginForm {
    const FIELDS: &'static [&'static str] = &["account_email", "account_password"];

    fn sanitize(&mut self) {
        trim(&mut self.account_email);
    }

    fn redact(&mut self) {
        self.account_password.clear();
    }
}

/// `POST /account/registration`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[validate(length(min = 1, message = "Please provide a first name."))]
    pub account_firstname: String,
    #[validate(length(min = 2, message = "Please provide a last name."))]
    pub account_lastname: String,
    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,
    #[validate(custom(
        function = "strong_password",
        message = "Password does not meet requirements."
    ))]
    pub account_password: String,
}

impl FormData for RegistrationForm {
    const FIELDS: &'static [&'static str] = &[
        "account_firstname",
        "account_lastname",
        "account_email",
        "account_password",
    ];

    fn sanitize(&mut self) {
        trim(&mut self.account_firstname);
        trim(&mut self.account_lastname);
        trim(&mut self.account_email);
    }

    fn redact(&mut self) {
        self.account_password.clear();
    }
}

/// Declarative rules plus the "email already registered" check.
pub async fn check_registration<S: AccountStore + ?Sized>(
    store: &S,
    form: RegistrationForm,
) -> StoreResult<Validated<RegistrationForm>> {
    let (form, mut checker) = check(form);
    if !checker.has_error("account_email") && store.email_exists(&form.account_email).await? {
        checker.error("account_email", EMAIL_EXISTS);
    }
    Ok(checker.finish(form))
}

/// `POST /account/update`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AccountUpdateForm {
    #[validate(length(min = 1, message = "Please provide a first name."))]
    pub account_firstname: String,
    #[validate(length(min = 2, message = "Please provide a last name."))]
    pub account_lastname: String,
    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,
}

impl AccountUpdateForm {
    pub fn to_update(&self) -> AccountUpdate {
        AccountUpdate {
            firstname: self.account_firstname.clone(),
            lastname: self.account_lastname.clone(),
            email: self.account_email.clone(),
        }
    }
}

impl FormData for AccountUpdateForm {
    const FIELDS: &'static [&'static str] =
        &["account_firstname", "account_lastname", "account_email"];

    fn sanitize(&mut self) {
        trim(&mut self.account_firstname);
        trim(&mut self.account_lastname);
        trim(&mut self.account_email);
    }
}

/// Declarative rules plus uniqueness of a changed email.
pub async fn check_account_update<S: AccountStore + ?Sized>(
    store: &S,
    current_email: &str,
    form: AccountUpdateForm,
) -> StoreResult<Validated<AccountUpdateForm>> {
    let (form, mut checker) = check(form);
    if !checker.has_error("account_email")
        && form.account_email != current_email
        && store.email_exists(&form.account_email).await?
    {
        checker.error("account_email", EMAIL_EXISTS);
    }
    Ok(checker.finish(form))
}

/// `POST /account/change-password`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PasswordForm {
    #[validate(custom(
        function = "strong_password",
        message = "Password does not meet requirements."
    ))]
    pub account_password: String,
}

impl FormData for PasswordForm {
    const FIELDS: &'static [&'static str] = &["account_password"];

    fn sanitize(&mut self) {}

    fn redact(&mut self) {
        self.account_password.clear();
    }
}

/// `POST /inventory/add-classification`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClassificationForm {
    #[validate(
        length(min = 1, message = "Classification name is required."),
        custom(
            function = "letters_and_digits",
            message = "Classification name cannot contain spaces or special characters."
        )
    )]
    pub classification_name: String,
}

impl FormData for ClassificationForm {
    const FIELDS: &'static [&'static str] = &["classification_name"];

    fn sanitize(&mut self) {
        trim(&mut self.classification_name);
    }
}

/// `POST /inventory/add-inventory`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InventoryForm {
    #[validate(custom(
        function = "whole_number",
        message = "Please select a classification."
    ))]
    pub classification_id: String,
    #[validate(length(min = 3, message = "Make is required and must be at least 3 characters."))]
    pub inv_make: String,
    #[validate(length(min = 3, message = "Model is required and must be at least 3 characters."))]
    pub inv_model: String,
    #[validate(custom(
        function = "four_digit_year",
        message = "Year is required and must be a 4-digit number."
    ))]
    pub inv_year: String,
    #[validate(length(min = 1, message = "Description is required."))]
    pub inv_description: String,
    #[validate(length(min = 1, message = "Image path is required."))]
    pub inv_image: String,
    #[validate(length(min = 1, message = "Thumbnail path is required."))]
    pub inv_thumbnail: String,
    #[validate(custom(
        function = "price",
        message = "Price is required and must be a valid number."
    ))]
    pub inv_price: String,
    #[validate(custom(
        function = "whole_number",
        message = "Miles is required and must be a number."
    ))]
    pub inv_miles: String,
    #[validate(
        length(min = 1, message = "Color is required and must contain only letters."),
        custom(
            function = "letters",
            message = "Color is required and must contain only letters."
        )
    )]
    pub inv_color: String,
}

impl InventoryForm {
    /// Selected classification, if the field parses.
    pub fn selected_classification(&self) -> Option<i32> {
        self.classification_id.parse().ok()
    }

    /// Typed vehicle. Only meaningful once the form has passed validation,
    /// which guarantees every numeric field parses.
    pub fn to_vehicle(&self) -> NewVehicle {
        NewVehicle {
            make: self.inv_make.clone(),
            model: self.inv_model.clone(),
            year: self.inv_year.clone(),
            description: self.inv_description.clone(),
            image: self.inv_image.clone(),
            thumbnail: self.inv_thumbnail.clone(),
            price: self.inv_price.parse().unwrap_or_default(),
            miles: self.inv_miles.parse().unwrap_or_default(),
            color: self.inv_color.clone(),
            classification_id: self.selected_classification().unwrap_or_default(),
        }
    }
}

impl From<&crate::models::Vehicle> for InventoryForm {
    fn from(v: &crate::models::Vehicle) -> Self {
        Self {
            classification_id: v.classification_id.to_string(),
            inv_make: v.make.clone(),
            inv_model: v.model.clone(),
            inv_year: v.year.clone(),
            inv_description: v.description.clone(),
            inv_image: v.image.clone(),
            inv_thumbnail: v.thumbnail.clone(),
            inv_price: v.price.to_string(),
            inv_miles: v.miles.to_string(),
            inv_color: v.color.clone(),
        }
    }
}

impl FormData for InventoryForm {
    const FIELDS: &'static [&'static str] = &[
        "classification_id",
        "inv_make",
        "inv_model",
        "inv_description",
        "inv_image",
        "inv_thumbnail",
        "inv_price",
        "inv_year",
        "inv_miles",
        "inv_color",
    ];

    fn sanitize(&mut self) {
        for field in [
            &mut self.classification_id,
            &mut self.inv_make,
            &mut self.inv_model,
            &mut self.inv_year,
            &mut self.inv_description,
            &mut self.inv_image,
            &mut self.inv_thumbnail,
            &mut self.inv_price,
            &mut self.inv_miles,
            &mut self.inv_color,
        ] {
            trim(field);
        }
    }
}

/// `POST /inventory/update`: the inventory fields plus the item being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VehicleUpdateForm {
    #[validate(custom(
        function = "whole_number",
        message = "The vehicle being edited could not be identified."
    ))]
    pub inv_id: String,
    #[serde(flatten)]
    #[validate(nested)]
    pub vehicle: InventoryForm,
}

impl VehicleUpdateForm {
    pub fn inv_id(&self) -> Option<i32> {
        self.inv_id.parse().ok()
    }
}

impl FormData for VehicleUpdateForm {
    const FIELDS: &'static [&'static str] = &[
        "inv_id",
        "classification_id",
        "inv_make",
        "inv_model",
        "inv_description",
        "inv_image",
        "inv_thumbnail",
        "inv_price",
        "inv_year",
        "inv_miles",
        "inv_color",
    ];

    fn sanitize(&mut self) {
        trim(&mut self.inv_id);
        self.vehicle.sanitize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewAccount;
    use crate::store::MemoryStore;
    use crate::validation::{FieldError, validate};

    fn messages(verdict: &Validated<impl Clone>) -> Vec<&str> {
        match verdict {
            Validated::Proceed(_) => Vec::new(),
            Validated::Redisplay { errors, .. } => {
                errors.iter().map(|e| e.message.as_str()).collect()
            }
        }
    }

    fn valid_vehicle() -> InventoryForm {
        InventoryForm {
            classification_id: "1".into(),
            inv_make: "Jeep".into(),
            inv_model: "Wrangler".into(),
            inv_year: "2019".into(),
            inv_description: "Small and compact".into(),
            inv_image: "/images/vehicles/wrangler.jpg".into(),
            inv_thumbnail: "/images/vehicles/wrangler-tn.jpg".into(),
            inv_price: "28045".into(),
            inv_miles: "41205".into(),
            inv_color: "Yellow".into(),
        }
    }

    #[test]
    fn classification_with_space_is_echoed_verbatim() {
        let verdict = validate(ClassificationForm {
            classification_name: "Sport Utility".into(),
        });
        match verdict {
            Validated::Redisplay { errors, echoed } => {
                assert_eq!(echoed.classification_name, "Sport Utility");
                assert_eq!(
                    errors,
                    vec![FieldError {
                        field: "classification_name",
                        message: "Classification name cannot contain spaces or special characters."
                            .into(),
                    }]
                );
            }
            Validated::Proceed(_) => panic!("expected redisplay"),
        }
    }

    #[test]
    fn alphanumeric_classification_proceeds() {
        let verdict = validate(ClassificationForm {
            classification_name: " Truck2 ".into(),
        });
        assert_eq!(
            verdict,
            Validated::Proceed(ClassificationForm {
                classification_name: "Truck2".into(),
            })
        );
    }

    #[test]
    fn inventory_errors_follow_field_order() {
        let mut form = valid_vehicle();
        form.inv_make = "VW".into();
        form.inv_year = "19".into();
        form.inv_color = "Dark Blue".into();

        let verdict = validate(form);
        assert_eq!(
            messages(&verdict),
            [
                "Make is required and must be at least 3 characters.",
                "Year is required and must be a 4-digit number.",
                "Color is required and must contain only letters.",
            ]
        );
    }

    #[test]
    fn valid_inventory_converts_to_vehicle() {
        let Validated::Proceed(form) = validate(valid_vehicle()) else {
            panic!("expected proceed");
        };
        let vehicle = form.to_vehicle();
        assert_eq!(vehicle.price, 28045);
        assert_eq!(vehicle.miles, 41205);
        assert_eq!(vehicle.classification_id, 1);
    }

    #[test]
    fn price_beyond_i32_is_accepted() {
        let mut form = valid_vehicle();
        form.inv_price = "3000000000".into();
        let Validated::Proceed(form) = validate(form) else {
            panic!("expected proceed");
        };
        assert_eq!(form.to_vehicle().price, 3_000_000_000);
    }

    #[test]
    fn blank_classification_name_reports_required_only() {
        let verdict = validate(ClassificationForm {
            classification_name: "  ".into(),
        });
        assert_eq!(messages(&verdict), ["Classification name is required."]);
    }

    #[test]
    fn update_form_reports_id_before_nested_vehicle_errors() {
        let mut vehicle = valid_vehicle();
        vehicle.inv_make = "VW".into();
        vehicle.inv_color = String::new();
        let verdict = validate(VehicleUpdateForm {
            inv_id: "x".into(),
            vehicle,
        });
        let Validated::Redisplay { errors, .. } = verdict else {
            panic!("expected redisplay");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["inv_id", "inv_make", "inv_color"]);
    }

    #[test]
    fn update_form_requires_inv_id() {
        let verdict = validate(VehicleUpdateForm {
            inv_id: String::new(),
            vehicle: valid_vehicle(),
        });
        assert_eq!(
            messages(&verdict),
            ["The vehicle being edited could not be identified."]
        );
    }

    #[test]
    fn failed_login_does_not_echo_password() {
        let verdict = validate(LoginForm {
            account_email: "not-an-email".into(),
            account_password: "secret".into(),
        });
        let Validated::Redisplay { echoed, .. } = verdict else {
            panic!("expected redisplay");
        };
        assert_eq!(echoed.account_email, "not-an-email");
        assert!(echoed.account_password.is_empty());
    }

    #[tokio::test]
    async fn registration_rejects_existing_email_and_weak_password() {
        let store = MemoryStore::new();
        store
            .register_account(&NewAccount {
                firstname: "A".into(),
                lastname: "Person".into(),
                email: "a@x.com".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();

        let verdict = check_registration(
            &store,
            RegistrationForm {
                account_firstname: "Another".into(),
                account_lastname: "Person".into(),
                account_email: "a@x.com".into(),
                account_password: "weak".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(messages(&verdict), [EMAIL_EXISTS, PASSWORD_RULE]);
        let Validated::Redisplay { echoed, .. } = verdict else {
            panic!("expected redisplay");
        };
        assert!(echoed.account_password.is_empty());
        assert_eq!(echoed.account_firstname, "Another");
    }

    #[tokio::test]
    async fn account_update_allows_keeping_own_email() {
        let store = MemoryStore::new();
        store
            .register_account(&NewAccount {
                firstname: "A".into(),
                lastname: "Person".into(),
                email: "a@x.com".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();

        let form = AccountUpdateForm {
            account_firstname: "Alex".into(),
            account_lastname: "Person".into(),
            account_email: "a@x.com".into(),
        };
        let verdict = check_account_update(&store, "a@x.com", form.clone()).await.unwrap();
        assert_eq!(verdict, Validated::Proceed(form.clone()));

        let verdict = check_account_update(&store, "b@x.com", form).await.unwrap();
        assert_eq!(messages(&verdict), [EMAIL_EXISTS]);
    }
}
