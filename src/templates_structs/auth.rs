use askama::Template;

use crate::auth::registration::InvitePreview;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
    pub email: String,
}

/// Sign-up page. With an invite, email and company are prefilled and locked.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub app_name: String,
    pub csrf_token: String,
    pub errors: Vec<String>,
    pub invite_token: Option<String>,
    pub invite: Option<InvitePreview>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

impl RegisterTemplate {
    pub fn is_locked(&self) -> bool {
        self.invite.is_some()
    }
}
