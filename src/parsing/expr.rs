use std::fmt;

/// A value read from source text. Atoms of every kind (symbols, numbers,
/// keywords) are kept as their source spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Symbol(String),
    String(String),
    List(Vec<Expr>),
}

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Expr {
        Expr::Symbol(name.into())
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::String(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::List(
            items
                .into_iter()
                .collect(),
        )
    }

    /// Name of the head symbol if this is a list that starts with one.
    pub fn head(&self) -> Option<&str> {
        match self {
            Expr::List(items) => match items.first() {
                Some(Expr::Symbol(name)) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Prints in a form the reader accepts back.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(name) => f.write_str(name),
            Expr::String(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"")
            }
            Expr::List(items) => {
                f.write_str("(")?;
                for (i, item) in items
                    .iter()
                    .enumerate()
                {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}
