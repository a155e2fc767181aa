//! Account views.

use cse_core::models::Identity;
use cse_core::validation::{AccountUpdateForm, FieldError, LoginForm, RegistrationForm};

use super::{error_list, escape};

const PASSWORD_HINT: &str = "Passwords must be at least 12 characters and contain at least 1 number, 1 capital letter and 1 special character.";

pub fn login(form: &LoginForm, errors: &[FieldError]) -> String {
    format!(
        r#"{errors}
<form id="loginForm" action="/account/login" method="post">
<label>Email <input type="email" name="account_email" required value="{email}"></label>
<label>Password <input type="password" name="account_password" required></label>
<button type="submit">Login</button>
</form>
<p>No account? <a href="/account/registration">Sign-up</a></p>"#,
        errors = error_list(errors),
        email = escape(&form.account_email),
    )
}

pub fn registration(form: &RegistrationForm, errors: &[FieldError]) -> String {
    format!(
        r#"{errors}
<form id="registerForm" action="/account/registration" method="post">
<label>First name <input type="text" name="account_firstname" required value="{firstname}"></label>
<label>Last name <input type="text" name="account_lastname" required value="{lastname}"></label>
<label>Email <input type="email" name="account_email" required value="{email}"></label>
<label>Password <input type="password" name="account_password" required></label>
<p class="hint">{PASSWORD_HINT}</p>
<button type="submit">Register</button>
</form>"#,
        errors = error_list(errors),
        firstname = escape(&form.account_firstname),
        lastname = escape(&form.account_lastname),
        email = escape(&form.account_email),
    )
}

pub fn management(identity: &Identity) -> String {
    let mut content = format!(
        r#"<h2>Welcome {}</h2>
<p>You're logged in.</p>
<p><a href="/account/update" title="Update account information">Edit Account Information</a></p>"#,
        escape(&identity.firstname)
    );
    if identity.is_staff() {
        content.push_str(
            r#"
<h3>Inventory Management</h3>
<p><a href="/inventory/" title="Manage inventory">Manage Inventory</a></p>"#,
        );
    }
    content
}

/// Profile form and password form on one page. Each form shows its own
/// errors.
pub fn update(
    form: &AccountUpdateForm,
    profile_errors: &[FieldError],
    password_errors: &[FieldError],
) -> String {
    format!(
        r#"<h2>Account Update</h2>
{profile_errors}
<form id="updateAccountForm" action="/account/update" method="post">
<label>First name <input type="text" name="account_firstname" required value="{firstname}"></label>
<label>Last name <input type="text" name="account_lastname" required value="{lastname}"></label>
<label>Email <input type="email" name="account_email" required value="{email}"></label>
<button type="submit">Update</button>
</form>
<h2>Change Password</h2>
<p class="hint">{PASSWORD_HINT}</p>
<p>Entering a password will change the current password.</p>
{password_errors}
<form id="changePasswordForm" action="/account/change-password" method="post">
<label>Password <input type="password" name="account_password" required></label>
<button type="submit">Change Password</button>
</form>"#,
        profile_errors = error_list(profile_errors),
        password_errors = error_list(password_errors),
        firstname = escape(&form.account_firstname),
        lastname = escape(&form.account_lastname),
        email = escape(&form.account_email),
    )
}
