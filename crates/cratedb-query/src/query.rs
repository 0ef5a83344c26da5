/// How a [`Query`] passes its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Statement only.
    Simple,
    /// One argument array sent as `args`.
    Parameterized,
    /// Several argument arrays sent as `bulk_args`.
    Bulk,
}

/// A SQL statement with optional arguments.
///
/// Arguments are pre-formed JSON array text, e.g. `["Calvin", 7]`. Single
/// and bulk arguments are mutually exclusive: setting one clears the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    statement: String,
    args: String,
    bulk_args: Vec<String>,
}

impl Query {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            ..Self::default()
        }
    }

    pub fn with_arguments(statement: impl Into<String>, args: impl Into<String>) -> Self {
        let mut query = Self::new(statement);
        query.set_arguments(args);
        query
    }

    pub fn with_bulk_arguments(statement: impl Into<String>, bulk_args: Vec<String>) -> Self {
        let mut query = Self::new(statement);
        query.set_bulk_arguments(bulk_args);
        query
    }

    pub fn is_empty(&self) -> bool {
        self.statement.is_empty() && self.args.is_empty() && self.bulk_args.is_empty()
    }

    pub fn kind(&self) -> QueryKind {
        if self.has_arguments() {
            QueryKind::Parameterized
        } else if self.has_bulk_arguments() {
            QueryKind::Bulk
        } else {
            QueryKind::Simple
        }
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn set_statement(&mut self, statement: impl Into<String>) {
        self.statement = statement.into();
    }

    pub fn has_statement(&self) -> bool {
        !self.statement.is_empty()
    }

    pub fn arguments(&self) -> &str {
        &self.args
    }

    pub fn set_arguments(&mut self, args: impl Into<String>) {
        self.args = args.into();
        self.bulk_args.clear();
    }

    pub fn has_arguments(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn bulk_arguments(&self) -> &[String] {
        &self.bulk_args
    }

    pub fn set_bulk_arguments(&mut self, bulk_args: Vec<String>) {
        self.bulk_args = bulk_args;
        self.args.clear();
    }

    pub fn has_bulk_arguments(&self) -> bool {
        !self.bulk_args.is_empty()
    }
}

impl From<&str> for Query {
    fn from(statement: &str) -> Self {
        Self::new(statement)
    }
}

impl From<String> for Query {
    fn from(statement: String) -> Self {
        Self::new(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query() {
        let q = Query::default();
        assert!(q.is_empty());
        assert!(!q.has_statement());
        assert_eq!(q.kind(), QueryKind::Simple);
    }

    #[test]
    fn constructors_pick_kind() {
        assert_eq!(Query::new("a").kind(), QueryKind::Simple);
        assert_eq!(Query::with_arguments("a", "[1]").kind(), QueryKind::Parameterized);
        assert_eq!(
            Query::with_bulk_arguments("a", vec!["[1]".into(), "[2]".into()]).kind(),
            QueryKind::Bulk
        );
        assert_eq!(Query::with_arguments("a", "").kind(), QueryKind::Simple);
        assert_eq!(Query::with_bulk_arguments("a", vec![]).kind(), QueryKind::Simple);
    }

    #[test]
    fn arguments_are_mutually_exclusive() {
        let mut q = Query::with_arguments("a", "[1]");
        q.set_bulk_arguments(vec!["[2]".into()]);
        assert!(!q.has_arguments());
        assert_eq!(q.arguments(), "");
        assert_eq!(q.kind(), QueryKind::Bulk);

        q.set_arguments("[3]");
        assert!(!q.has_bulk_arguments());
        assert!(q.bulk_arguments().is_empty());
        assert_eq!(q.kind(), QueryKind::Parameterized);
    }

    #[test]
    fn statement_is_independent_of_arguments() {
        let mut q = Query::from("SELECT 1");
        q.set_arguments("[1]");
        assert_eq!(q.statement(), "SELECT 1");
        q.set_statement("SELECT 2");
        assert_eq!(q.arguments(), "[1]");
        assert!(!q.is_empty());
    }
}
