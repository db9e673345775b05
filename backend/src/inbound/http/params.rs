//! Query parameters shared by list endpoints.

use serde::Deserialize;

use crate::domain::catalog::ListWindow;

/// `?offset=&limit=` window; out-of-range values are clamped.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn window(&self) -> ListWindow {
        ListWindow::new(self.offset, self.limit)
    }
}

/// List filter narrowing results to one category.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub category_id: Option<i32>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl CategoryListQuery {
    pub fn window(&self) -> ListWindow {
        ListWindow::new(self.offset, self.limit)
    }
}

/// `?limit=` for endpoints with their own default and cap.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}
