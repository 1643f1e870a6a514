//! HTML rendering. Templates are compiled into the binary and rendered with Tera.

use anyhow::Context as _;
use axum::{
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    cookies,
    error::AppError,
    flash::{IncomingFlash, FLASH_COOKIE},
};

pub struct Views {
    tera: Tera,
    secure_cookies: bool,
}

impl Views {
    pub fn new(secure_cookies: bool) -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("login.html", include_str!("../templates/login.html")),
            ("register.html", include_str!("../templates/register.html")),
            ("admin/dashboard.html", include_str!("../templates/admin/dashboard.html")),
            ("admin/students.html", include_str!("../templates/admin/students.html")),
            ("admin/companies.html", include_str!("../templates/admin/companies.html")),
            ("admin/drives.html", include_str!("../templates/admin/drives.html")),
            ("company/dashboard.html", include_str!("../templates/company/dashboard.html")),
            ("company/create_drive.html", include_str!("../templates/company/create_drive.html")),
            ("student/dashboard.html", include_str!("../templates/student/dashboard.html")),
        ])
        .context("compile templates")?;
        Ok(Self {
            tera,
            secure_cookies,
        })
    }

    /// Renders `template` with `data` and the pending flash message (if any).
    pub fn page<T: Serialize>(
        &self,
        template: &str,
        data: &T,
        flash: IncomingFlash,
    ) -> Result<Page, AppError> {
        let mut ctx = Context::from_serialize(data)
            .with_context(|| format!("build context for {}", template))?;
        ctx.insert("flash", &flash.message());
        let html = self
            .tera
            .render(template, &ctx)
            .with_context(|| format!("render {}", template))?;
        Ok(Page {
            status: StatusCode::OK,
            html,
            clear_flash: flash.is_set(),
            secure_cookie: self.secure_cookies,
        })
    }
}

/// A rendered page. Consumes the flash cookie it displayed.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub html: String,
    pub clear_flash: bool,
    pub secure_cookie: bool,
}

impl Page {
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        if self.clear_flash {
            (
                self.status,
                AppendHeaders([(SET_COOKIE, cookies::expire(FLASH_COOKIE, self.secure_cookie))]),
                Html(self.html),
            )
                .into_response()
        } else {
            (self.status, Html(self.html)).into_response()
        }
    }
}

/// Context for templates that need nothing but the flash.
#[derive(Serialize)]
pub struct Empty {}
