//! List-query parameters shared by link and product repositories.

/// Sortable columns for link/product listings.
///
/// A closed enum so ORDER BY clauses are always built from known column
/// names, never from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    ClickCount,
    /// The user-curated display order (`position` column).
    #[default]
    Position,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::ClickCount => "click_count",
            SortField::Position => "position",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated, offset-based page window with sort order.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery {
    pub offset: i64,
    pub limit: i64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl ListQuery {
    /// Renders the ORDER BY fragment, e.g. `position ASC`.
    pub fn order_by(&self) -> String {
        format!("{} {}", self.sort.column(), self.direction.keyword())
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
            sort: SortField::default(),
            direction: SortDirection::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_fragment() {
        let q = ListQuery {
            offset: 0,
            limit: 20,
            sort: SortField::ClickCount,
            direction: SortDirection::Desc,
        };
        assert_eq!(q.order_by(), "click_count DESC");
    }

    #[test]
    fn test_default_sorts_by_position() {
        assert_eq!(ListQuery::default().order_by(), "position ASC");
    }
}
