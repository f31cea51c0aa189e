/// One table column: the entity field it shows and whether it is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub visible: bool,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            visible: true,
        }
    }

    /// Column available in the toggle menu but off by default.
    pub const fn hidden(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            visible: false,
        }
    }
}

/// Column set of a list screen. Visibility lives for the page only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Columns(Vec<Column>);

impl Columns {
    pub fn new(columns: Vec<Column>) -> Self {
        Self(columns)
    }

    /// Flip one column. Unknown keys are ignored.
    pub fn toggle(&mut self, key: &str) -> bool {
        match self.0.iter_mut().find(|c| c.key == key) {
            Some(column) => {
                column.visible = !column.visible;
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.0.iter().any(|c| c.key == key && c.visible)
    }

    pub fn all(&self) -> &[Column] {
        &self.0
    }

    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.0.iter().filter(|c| c.visible)
    }

    /// Visible data columns plus the actions column, for `colspan`.
    pub fn visible_count(&self) -> usize {
        self.visible().count() + 1
    }
}

impl From<Vec<Column>> for Columns {
    fn from(columns: Vec<Column>) -> Self {
        Self::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Columns {
        Columns::new(vec![
            Column::new("name", "Name"),
            Column::new("phone", "Phone"),
            Column::hidden("email", "Email"),
        ])
    }

    #[test]
    fn test_visible_count_includes_actions() {
        let cols = columns();
        assert_eq!(cols.visible_count(), 3);
        assert_eq!(Columns::default().visible_count(), 1);
    }

    #[test]
    fn test_double_toggle_restores() {
        let original = columns();
        for key in ["name", "phone", "email"] {
            let mut cols = original.clone();
            assert!(cols.toggle(key));
            assert_ne!(cols, original);
            assert!(cols.toggle(key));
            assert_eq!(cols, original);
        }
    }

    #[test]
    fn test_toggle_updates_count() {
        let mut cols = columns();
        cols.toggle("email");
        assert!(cols.is_visible("email"));
        assert_eq!(cols.visible_count(), 4);
        cols.toggle("name");
        cols.toggle("phone");
        assert_eq!(cols.visible_count(), 2);
        assert_eq!(
            cols.visible().map(|c| c.key).collect::<Vec<_>>(),
            vec!["email"]
        );
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut cols = columns();
        assert!(!cols.toggle("missing"));
        assert_eq!(cols, columns());
    }
}
