use crate::domain::session::Session;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Home,
    Login,
    Register,
    Unauthorized,
    Missing,
    ViewExpenses,
    AddExpense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Navigation {
    Render(Route),
    Redirect { to: Route, from: Route },
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Unauthorized,
        Route::Missing,
        Route::ViewExpenses,
        Route::AddExpense,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Unauthorized => "/unauthorized",
            Route::Missing => "/missing",
            Route::ViewExpenses => "/viewexpenses",
            Route::AddExpense => "/addexpense",
        }
    }

    /// 路徑比對不分大小寫，未知路徑一律導向 Missing
    pub fn resolve(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_ascii_lowercase()
        } else {
            format!("/{}", trimmed.to_ascii_lowercase())
        };

        Route::ALL
            .into_iter()
            .find(|r| r.path() == normalized)
            .unwrap_or(Route::Missing)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::ViewExpenses | Route::AddExpense)
    }

    /// 已登入放行；只有 token 沒有使用者導向 Missing，其餘導向 Login
    pub fn guard(self, session: &Session) -> Navigation {
        if !self.requires_auth() || session.is_signed_in() {
            return Navigation::Render(self);
        }

        let to = if session.has_token() {
            Route::Missing
        } else {
            Route::Login
        };
        tracing::debug!("Redirecting {} to {}", self.path(), to.path());
        Navigation::Redirect { to, from: self }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub fn navigate(path: &str, session: &Session) -> Navigation {
    Route::resolve(path).guard(session)
}
